use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, AsyncWrite, AsyncWriteExt as _};

use crate::contact::ContactForm;
use crate::render::{self, Stylesheet};
use crate::shell::{App, ShellEvent};
use crate::store::KvStore;

#[derive(Debug, Clone)]
pub enum SessionCommand {
    Event(ShellEvent),
    Render,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> anyhow::Result<SessionCommand> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let event = match word {
            "go" | "nav" => {
                if rest.is_empty() {
                    anyhow::bail!("usage: go <path>");
                }
                ShellEvent::Navigate(rest.to_string())
            }
            "click" => ShellEvent::NavLinkClicked(rest.to_string()),
            "toggle-theme" | "theme" => ShellEvent::ToggleTheme,
            "scroll" => {
                let y = rest
                    .parse()
                    .map_err(|_| anyhow::anyhow!("usage: scroll <px>"))?;
                ShellEvent::Scrolled(y)
            }
            "online" => ShellEvent::Online,
            "offline" => ShellEvent::Offline,
            "dismiss" => ShellEvent::DismissOffline,
            "menu" => ShellEvent::ToggleMenu,
            "submit" => {
                let mut parts = rest.splitn(3, char::is_whitespace);
                let email = parts.next().unwrap_or("");
                let subject = parts.next().unwrap_or("");
                let message = parts.next().unwrap_or("").trim();
                ShellEvent::SubmitContact(ContactForm::new(email, subject, message))
            }
            "render" => return Ok(SessionCommand::Render),
            "quit" | "exit" => return Ok(SessionCommand::Quit),
            other => anyhow::bail!("unknown command {other:?}"),
        };
        Ok(SessionCommand::Event(event))
    }
}

/// Interleaves commands read from `input` with the shell's own timer and
/// network events, printing a state line after every change.
pub async fn run<S, R, W>(app: App<S>, input: R, mut output: W) -> anyhow::Result<()>
where
    S: KvStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (mut shell, mut events) = app.into_parts();
    let mut lines = input.lines();
    write_line(&mut output, &shell.summary()).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match SessionCommand::parse(&line) {
                    Ok(SessionCommand::Event(event)) => {
                        shell.handle(event);
                        write_line(&mut output, &shell.summary()).await?;
                    }
                    Ok(SessionCommand::Render) => {
                        let html = render::render_page(&shell.view(), Stylesheet::Link("/assets/site.css"));
                        write_line(&mut output, &html).await?;
                    }
                    Ok(SessionCommand::Quit) => break,
                    Err(err) => write_line(&mut output, &format!("error: {err}")).await?,
                }
            }
            Some(event) = events.recv() => {
                if shell.handle(event) {
                    write_line(&mut output, &shell.summary()).await?;
                }
            }
        }
    }
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> anyhow::Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
