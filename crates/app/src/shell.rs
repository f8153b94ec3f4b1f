use crate::cli::{Commands, ShellCommand, ShellLine};
use crate::{commands, render};
use clap::Parser;
use finboard_views::AppContext;
use finboard_views::session::SessionView;
use std::error::Error;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// # Summary
/// 交互模式：逐行读取命令，共享同一个 `AppContext`，
/// 因此登录状态与主题在退出前一直有效。
///
/// # Logic
/// 1. 启动时检查登录状态并应用已保存的主题。
/// 2. 每行按空白切分后交给 clap 解析。
/// 3. `exit` 或输入结束时退出。
pub async fn run(ctx: &AppContext) -> Result<(), Box<dyn Error>> {
    let mut session = SessionView::new(ctx.clone());
    if session.check_login_status().await {
        println!("Logged in as {}", session.username.as_deref().unwrap_or_default());
    }
    if let Some(theme) = session.apply_saved_theme().await {
        println!("Theme: {theme}");
    }
    info!("Interactive shell started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            prompt();
            continue;
        }

        match ShellLine::try_parse_from(words.iter().copied()) {
            Err(e) => println!("{e}"),
            Ok(parsed) => match parsed.command {
                ShellCommand::Exit => break,
                ShellCommand::Login { username, password } => {
                    if session.login(&username, &password).await {
                        println!("{}", session.message.as_deref().unwrap_or_default());
                    } else {
                        println!("{}", session.error.as_deref().unwrap_or_default());
                    }
                }
                ShellCommand::Logout => {
                    session.logout().await;
                    println!("Logged out.");
                }
                ShellCommand::Whoami => match ctx.store.load_session().await {
                    Ok(snapshot) => print!("{}", render::session(&snapshot)),
                    Err(e) => println!("error: {e}"),
                },
                ShellCommand::Theme => {
                    let theme = session.toggle_theme().await;
                    println!("Theme: {theme}");
                }
                ShellCommand::Run(Commands::Shell) => println!("Already in the shell."),
                ShellCommand::Run(command) => {
                    if let Err(e) = commands::run(ctx, command).await {
                        println!("error: {e}");
                    }
                }
            },
        }
        prompt();
    }

    info!("Interactive shell closed");
    Ok(())
}

fn prompt() {
    print!("finboard> ");
    if let Err(e) = std::io::stdout().flush() {
        debug!("stdout flush failed: {}", e);
    }
}
