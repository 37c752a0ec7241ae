//! Interactive prompt loop.

use super::{AgentError, AgentRuntime, AgentSession};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const PROMPT: &str = "Prompt (or 'exit') > ";
pub const EXIT_COMMAND: &str = "exit";
pub const EXIT_MESSAGE: &str = "Exiting...";

/// Read prompts from `input` until `exit` (any case) or end of input.
///
/// Each answer is written as the completion text followed by
/// `input: <n>, output: <m>`. Blank lines are skipped. The first failed
/// invocation ends the loop with its error.
pub async fn run_repl<R, I, O>(
    session: &AgentSession<R>,
    mut input: I,
    mut output: O,
) -> Result<(), AgentError>
where
    R: AgentRuntime,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            output.write_all(b"\n").await?;
            break;
        }

        let prompt = line.trim();
        if prompt.eq_ignore_ascii_case(EXIT_COMMAND) {
            output
                .write_all(format!("{}\n", EXIT_MESSAGE).as_bytes())
                .await?;
            break;
        }
        if prompt.is_empty() {
            continue;
        }

        let completion = session.invoke(prompt).await?;
        output
            .write_all(
                format!(
                    "{}\ninput: {}, output: {}\n",
                    completion.text, completion.usage.input_tokens, completion.usage.output_tokens
                )
                .as_bytes(),
            )
            .await?;
    }

    output.flush().await?;
    Ok(())
}
