//! Interactive menu loop.
//!
//! Reads choices line by line and prints each operation's status line. End of
//! input behaves like choosing "Exit".

use records_core::{Console, PathsConfig};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

const MENU: [&str; 5] = [
    "Choose an option:",
    "1. Add Record",
    "2. Search by Name",
    "3. Remove Record",
    "4. Exit",
];

/// Run the menu until the user exits or input ends.
pub async fn run<R, W>(console: &Console, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    for line in MENU {
        write_line(&mut output, line).await?;
    }

    loop {
        let Some(choice) = ask(&mut lines, &mut output, "Enter your choice: ").await? else {
            break;
        };

        let message = match choice.trim() {
            "1" => {
                let Some(id) = ask(&mut lines, &mut output, "Enter ID: ").await? else {
                    break;
                };
                let Some(name) = ask(&mut lines, &mut output, "Enter Name: ").await? else {
                    break;
                };
                let Some(age) = ask(&mut lines, &mut output, "Enter Age: ").await? else {
                    break;
                };
                console.add(parse_number(&id), &name, parse_number(&age)).await
            }
            "2" => {
                let Some(name) = ask(&mut lines, &mut output, "Enter Name to Search: ").await?
                else {
                    break;
                };
                console.search(&name).await
            }
            "3" => {
                let Some(name) = ask(&mut lines, &mut output, "Enter Name to Remove: ").await?
                else {
                    break;
                };
                console.remove(&name).await
            }
            "4" => break,
            _ => "Invalid choice. Try again.".to_string(),
        };

        write_line(&mut output, &message).await?;
    }

    write_line(&mut output, "Exiting...").await?;
    output.flush().await
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(PathsConfig::LINE_ENDING.as_bytes()).await
}

async fn ask<R, W>(lines: &mut Lines<R>, output: &mut W, prompt: &str) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(prompt.as_bytes()).await?;
    output.flush().await?;
    lines.next_line().await
}

/// Non-numeric input reads as 0, which the store rejects as invalid.
fn parse_number(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use records_core::{RecordStore, StoreConfig};
    use tempfile::TempDir;

    async fn run_script(dir: &TempDir, script: &str) -> String {
        let console = Console::new(RecordStore::new(StoreConfig::in_dir(dir.path())));
        console.initialize().await;

        let mut output = Vec::new();
        run(&console, script.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_add_search_remove_session() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "1\n4\nAli\n35\n2\nAli\n3\nAli\n2\nAli\n4\n").await;

        assert!(out.starts_with(&format!("Choose an option:{}", PathsConfig::LINE_ENDING)));
        assert!(out.contains("Record added successfully."));
        assert!(out.contains(&format!("4,Ali,35{}", PathsConfig::LINE_ENDING)));
        assert!(out.contains("Record removed successfully."));
        assert!(out.contains("Record not found."));
        assert!(out.ends_with(&format!("Exiting...{}", PathsConfig::LINE_ENDING)));
    }

    #[tokio::test]
    async fn test_invalid_choice_and_bad_number() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "9\n1\nabc\nBob\n20\n").await;

        assert!(out.contains("Invalid choice. Try again."));
        assert!(out.contains("Invalid input. Record not added."));
        assert!(out.ends_with(&format!("Exiting...{}", PathsConfig::LINE_ENDING)));
    }

    #[tokio::test]
    async fn test_multi_line_results_use_platform_line_ending() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "1\n9\nRiaz\n61\n2\nRiaz\n4\n").await;

        let le = PathsConfig::LINE_ENDING;
        assert!(out.contains(&format!("2,Riaz,25{le}9,Riaz,61{le}")));
        if le == "\r\n" {
            assert!(!out.replace("\r\n", "").contains('\n'));
        }
    }

    #[tokio::test]
    async fn test_eof_mid_prompt_exits() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "2\n").await;
        assert!(out.contains("Enter Name to Search: "));
        assert!(out.ends_with(&format!("Exiting...{}", PathsConfig::LINE_ENDING)));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 42 "), 42);
        assert_eq!(parse_number("-3"), -3);
        assert_eq!(parse_number("x"), 0);
    }
}
