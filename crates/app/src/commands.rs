use std::sync::Arc;

use quiz_core::model::QuizDraft;
use services::{
    AppServices, Console, ConsoleError, PlayError, PlayService, QuizService, QuizServiceError,
    parse_quiz_id,
};
use thiserror::Error;

const PROMPT: &str = "quiz> ";

/// One line typed at the idle prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Show(Option<String>),
    Add,
    Delete(Option<String>),
    Edit(Option<String>),
    Test(Option<String>),
    Play,
    Credits,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    /// The first word selects the command (case-insensitive), the second is its `<id>`.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Self::Empty;
        };
        let arg = words.next().map(str::to_string);

        match name.to_lowercase().as_str() {
            "h" | "help" => Self::Help,
            "list" => Self::List,
            "show" => Self::Show(arg),
            "add" => Self::Add,
            "delete" => Self::Delete(arg),
            "edit" => Self::Edit(arg),
            "test" => Self::Test(arg),
            "p" | "play" => Self::Play,
            "credits" => Self::Credits,
            "q" | "quit" => Self::Quit,
            _ => Self::Unknown(name.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Quiz(#[from] QuizServiceError),
    #[error(transparent)]
    Play(#[from] PlayError),
    #[error(transparent)]
    Console(#[from] ConsoleError),
}

/// Reads commands at the idle prompt and runs them until `quit` or end of input.
pub struct Dispatcher {
    quizzes: Arc<QuizService>,
    play: Arc<PlayService>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(services: &AppServices) -> Self {
        Self {
            quizzes: services.quiz_service(),
            play: services.play_service(),
        }
    }

    /// Run the prompt loop. Command failures are reported and never end the loop.
    pub async fn run(&self, console: &mut dyn Console) {
        loop {
            let line = match console.prompt_line(PROMPT).await {
                Ok(line) => line,
                Err(ConsoleError::Closed) => break,
                Err(err) => {
                    tracing::error!(%err, "reading command failed");
                    console.report_error(&err.to_string());
                    break;
                }
            };
            if self.execute(console, Command::parse(&line)).await == Flow::Quit {
                break;
            }
        }
        console.report_line("Bye!");
    }

    pub async fn execute(&self, console: &mut dyn Console, command: Command) -> Flow {
        tracing::debug!(?command, "dispatching");
        let result = match command {
            Command::Help => {
                print_help(console);
                Ok(())
            }
            Command::List => self.list(console).await,
            Command::Show(arg) => self.show(console, arg.as_deref()).await,
            Command::Add => self.add(console).await,
            Command::Delete(arg) => self.delete(console, arg.as_deref()).await,
            Command::Edit(arg) => self.edit(console, arg.as_deref()).await,
            Command::Test(arg) => self
                .play
                .run_single_test(console, arg.as_deref())
                .await
                .map(|_| ())
                .map_err(CommandError::from),
            Command::Play => self
                .play
                .run_play_session(console)
                .await
                .map(|_| ())
                .map_err(CommandError::from),
            Command::Credits => {
                console.report_line("Credits:");
                console.report_line(&format!(
                    "  {} {}",
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION")
                ));
                Ok(())
            }
            Command::Quit => return Flow::Quit,
            Command::Empty => Ok(()),
            Command::Unknown(name) => {
                console.report_error(&format!("Unknown command: '{name}'"));
                console.report_line("Use 'help' to see all the commands.");
                Ok(())
            }
        };

        if let Err(err) = result {
            report_failure(console, &err);
        }
        Flow::Continue
    }

    async fn list(&self, console: &mut dyn Console) -> Result<(), CommandError> {
        for quiz in self.quizzes.list_quizzes().await? {
            console.report_line(&format!(" [{}]: {}", quiz.id(), quiz.question()));
        }
        Ok(())
    }

    async fn show(
        &self,
        console: &mut dyn Console,
        arg: Option<&str>,
    ) -> Result<(), CommandError> {
        let quiz = self.quizzes.get_quiz(parse_quiz_id(arg)?).await?;
        console.report_line(&format!(
            " [{}]: {} => {}",
            quiz.id(),
            quiz.question(),
            quiz.answer()
        ));
        Ok(())
    }

    async fn add(&self, console: &mut dyn Console) -> Result<(), CommandError> {
        let question = console.prompt_line(" Enter a question: ").await?;
        let answer = console.prompt_line(" Enter the answer: ").await?;
        let quiz = self
            .quizzes
            .create_quiz(QuizDraft::new(question, answer))
            .await?;
        console.report_line(&format!(" Added: {} => {}", quiz.question(), quiz.answer()));
        Ok(())
    }

    async fn delete(
        &self,
        console: &mut dyn Console,
        arg: Option<&str>,
    ) -> Result<(), CommandError> {
        let id = parse_quiz_id(arg)?;
        self.quizzes.delete_quiz(id).await?;
        console.report_line(&format!(" Deleted quiz {id}."));
        Ok(())
    }

    async fn edit(
        &self,
        console: &mut dyn Console,
        arg: Option<&str>,
    ) -> Result<(), CommandError> {
        let id = parse_quiz_id(arg)?;
        let current = self.quizzes.get_quiz(id).await?;

        let question = prompt_keeping(console, " Enter a question", current.question()).await?;
        let answer = prompt_keeping(console, " Enter the answer", current.answer()).await?;
        let quiz = self
            .quizzes
            .update_quiz(id, QuizDraft::new(question, answer))
            .await?;

        console.report_line(&format!(
            " Quiz {} changed to: {} => {}",
            quiz.id(),
            quiz.question(),
            quiz.answer()
        ));
        Ok(())
    }
}

/// Prompt showing the current value; an empty reply keeps it.
async fn prompt_keeping(
    console: &mut dyn Console,
    label: &str,
    current: &str,
) -> Result<String, ConsoleError> {
    let reply = console.prompt_line(&format!("{label} [{current}]: ")).await?;
    if reply.trim().is_empty() {
        Ok(current.to_string())
    } else {
        Ok(reply)
    }
}

fn report_failure(console: &mut dyn Console, err: &CommandError) {
    tracing::debug!(%err, "command failed");
    match err {
        CommandError::Quiz(QuizServiceError::Validation(validation)) => {
            console.report_error("The quiz is invalid:");
            for violation in validation.violations() {
                console.report_error(&format!("  {violation}"));
            }
        }
        // End of input: the prompt loop stops on its next read.
        CommandError::Console(ConsoleError::Closed)
        | CommandError::Play(PlayError::Console(ConsoleError::Closed)) => {}
        other => console.report_error(&other.to_string()),
    }
}

fn print_help(console: &mut dyn Console) {
    for line in [
        "Commands:",
        "  h|help - Show this help.",
        "  list - List the existing quizzes.",
        "  show <id> - Show the question and answer of a quiz.",
        "  add - Add a new quiz interactively.",
        "  delete <id> - Delete a quiz.",
        "  edit <id> - Edit a quiz.",
        "  test <id> - Test yourself on one quiz.",
        "  p|play - Answer every quiz once, in random order.",
        "  credits - Credits.",
        "  q|quit - Leave the program.",
    ] {
        console.report_line(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use quiz_core::time::fixed_clock;
    use services::Emphasis;
    use std::collections::VecDeque;
    use storage::repository::Storage;

    /// Replays queued input lines and records everything written.
    #[derive(Default)]
    struct ReplayConsole {
        input: VecDeque<String>,
        prompts: Vec<String>,
        lines: Vec<String>,
        errors: Vec<String>,
    }

    impl ReplayConsole {
        fn with_input(lines: &[&str]) -> Self {
            Self {
                input: lines.iter().map(|l| (*l).to_string()).collect(),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl Console for ReplayConsole {
        async fn prompt_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
            self.prompts.push(prompt.to_string());
            self.input.pop_front().ok_or(ConsoleError::Closed)
        }

        fn report_line(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }

        fn report_emphasized(&mut self, text: &str, _emphasis: Emphasis) {
            self.lines.push(text.to_string());
        }

        fn report_error(&mut self, text: &str) {
            self.errors.push(text.to_string());
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(&AppServices::from_storage(
            &Storage::in_memory(),
            fixed_clock(),
        ))
    }

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!(Command::parse("  "), Command::Empty);
        assert_eq!(Command::parse("H"), Command::Help);
        assert_eq!(Command::parse("p"), Command::Play);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("show 3"), Command::Show(Some("3".into())));
        assert_eq!(Command::parse("TEST   12  extra"), Command::Test(Some("12".into())));
        assert_eq!(Command::parse("edit"), Command::Edit(None));
        assert_eq!(Command::parse("frobnicate 1"), Command::Unknown("frobnicate".into()));
    }

    #[tokio::test]
    async fn add_then_list_and_show() {
        let dispatcher = dispatcher();
        let mut console = ReplayConsole::with_input(&[
            "add",
            " 2+2? ",
            "4",
            "list",
            "show 1",
            "q",
        ]);

        dispatcher.run(&mut console).await;

        assert!(console.errors.is_empty(), "{:?}", console.errors);
        assert!(console.lines.contains(&" Added: 2+2? => 4".to_string()));
        assert!(console.lines.contains(&" [1]: 2+2?".to_string()));
        assert!(console.lines.contains(&" [1]: 2+2? => 4".to_string()));
        assert_eq!(console.lines.last().map(String::as_str), Some("Bye!"));
    }

    #[tokio::test]
    async fn invalid_add_reports_each_violation_and_continues() {
        let dispatcher = dispatcher();
        let mut console = ReplayConsole::with_input(&["add", "", " ", "list"]);

        dispatcher.run(&mut console).await;

        assert_eq!(
            console.errors,
            vec![
                "The quiz is invalid:".to_string(),
                "  question must not be empty".to_string(),
                "  answer must not be empty".to_string(),
            ]
        );
        // list printed nothing, loop ended at end of input
        assert_eq!(console.lines, vec!["Bye!".to_string()]);
    }

    #[tokio::test]
    async fn edit_keeps_blank_fields_and_confirms_new_answer() {
        let dispatcher = dispatcher();
        let mut console = ReplayConsole::with_input(&[
            "add",
            "capital of France?",
            "Paris",
            "edit 1",
            "",
            "  París ",
            "show 1",
        ]);

        dispatcher.run(&mut console).await;

        assert!(console.errors.is_empty(), "{:?}", console.errors);
        assert!(
            console
                .prompts
                .contains(&" Enter the answer [Paris]: ".to_string())
        );
        assert!(
            console
                .lines
                .contains(&" Quiz 1 changed to: capital of France? => París".to_string())
        );
        assert!(
            console
                .lines
                .contains(&" [1]: capital of France? => París".to_string())
        );
    }

    #[tokio::test]
    async fn id_errors_are_single_lines() {
        let dispatcher = dispatcher();
        let mut console =
            ReplayConsole::with_input(&["show", "delete abc", "test 5", "edit 9", "bogus"]);

        dispatcher.run(&mut console).await;

        assert_eq!(
            console.errors,
            vec![
                "missing <id> parameter".to_string(),
                "the <id> parameter is not a number: 'abc' is not a valid quiz id".to_string(),
                "there is no quiz with id 5".to_string(),
                "there is no quiz with id 9".to_string(),
                "Unknown command: 'bogus'".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn play_and_test_return_to_the_prompt() {
        let dispatcher = dispatcher();
        let mut console = ReplayConsole::with_input(&[
            "add", "2+2?", "4", "test 1", " 4 ", "play", "5", "credits",
        ]);

        dispatcher.run(&mut console).await;

        assert!(console.errors.is_empty(), "{:?}", console.errors);
        assert!(console.lines.contains(&"Your answer is correct.".to_string()));
        assert!(
            console
                .lines
                .contains(&"INCORRECT - Game over. Score: 0".to_string())
        );
        assert!(console.lines.contains(&"Credits:".to_string()));
        assert_eq!(console.prompts.last().map(String::as_str), Some(PROMPT));
    }

    #[tokio::test]
    async fn delete_removes_quiz() {
        let dispatcher = dispatcher();
        let mut console =
            ReplayConsole::with_input(&["add", "Q", "A", "delete 1", "delete 1", "list"]);

        dispatcher.run(&mut console).await;

        assert!(console.lines.contains(&" Deleted quiz 1.".to_string()));
        assert_eq!(console.errors, vec!["there is no quiz with id 1".to_string()]);
        assert!(!console.lines.iter().any(|l| l.starts_with(" [1]")));
    }
}
