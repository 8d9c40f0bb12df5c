use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{QuizDraft, QuizId};
use quiz_core::time::fixed_clock;
use services::{
    Console, ConsoleError, Emphasis, PlayError, PlayService, PlayState, QuizService,
    QuizServiceError,
};
use storage::repository::{InMemoryRepository, QuizRepository};

/// Console that answers from a question → reply table and records all output.
#[derive(Default)]
struct ScriptedConsole {
    answers: HashMap<String, String>,
    /// 1-based prompt that gets a wrong reply.
    wrong_at: Option<usize>,
    /// Deletes every other quiz from this repository on the first prompt.
    delete_others: Option<InMemoryRepository>,
    prompts: Vec<String>,
    lines: Vec<String>,
    emphasized: Vec<(String, Emphasis)>,
}

impl ScriptedConsole {
    fn answering(pairs: &[(&str, &str)]) -> Self {
        Self {
            answers: pairs
                .iter()
                .map(|(q, a)| ((*q).to_string(), (*a).to_string()))
                .collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn prompt_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        let question = prompt.trim().to_string();
        self.prompts.push(question.clone());

        if self.prompts.len() == 1 {
            if let Some(repo) = self.delete_others.take() {
                for quiz in repo.list_quizzes().await.unwrap() {
                    if quiz.question() != question {
                        repo.delete_quiz(quiz.id()).await.unwrap();
                    }
                }
            }
        }

        if self.wrong_at == Some(self.prompts.len()) {
            return Ok("definitely wrong".to_string());
        }
        self.answers
            .get(&question)
            .cloned()
            .ok_or(ConsoleError::Closed)
    }

    fn report_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn report_emphasized(&mut self, text: &str, emphasis: Emphasis) {
        self.emphasized.push((text.to_string(), emphasis));
    }

    fn report_error(&mut self, text: &str) {
        self.lines.push(format!("error: {text}"));
    }
}

async fn seeded(pairs: &[(&str, &str)]) -> (InMemoryRepository, PlayService) {
    let repo = InMemoryRepository::new();
    let quizzes = QuizService::new(fixed_clock(), Arc::new(repo.clone()));
    for (question, answer) in pairs {
        quizzes
            .create_quiz(QuizDraft::new(*question, *answer))
            .await
            .unwrap();
    }
    let play = PlayService::new(Arc::new(repo.clone()));
    (repo, play)
}

const SCENARIO: [(&str, &str); 2] = [("2+2?", "4"), ("capital of France?", "Paris")];

#[tokio::test]
async fn all_correct_answers_win_with_full_score() {
    let (_repo, play) = seeded(&SCENARIO).await;
    let mut console =
        ScriptedConsole::answering(&[("2+2?", "4"), ("capital of France?", " paris ")]);

    let outcome = play.run_play_session(&mut console).await.unwrap();

    assert_eq!(outcome.state, PlayState::Won);
    assert_eq!(outcome.score, 2);
    assert_eq!(outcome.total, 2);
    assert_eq!(console.prompts.len(), 2);
    assert_ne!(console.prompts[0], console.prompts[1]);
    assert!(console.lines.iter().any(|l| l == "Nothing more to ask."));
    assert_eq!(
        console.emphasized.last(),
        Some(&("2".to_string(), Emphasis::Score))
    );
}

#[tokio::test]
async fn wrong_answer_ends_the_session() {
    let (_repo, play) = seeded(&SCENARIO).await;
    let mut console =
        ScriptedConsole::answering(&[("2+2?", "4"), ("capital of France?", "Berlin")]);

    let outcome = play.run_play_session(&mut console).await.unwrap();

    assert_eq!(outcome.state, PlayState::Lost);
    assert_eq!(
        console.prompts.last().map(String::as_str),
        Some("capital of France?")
    );
    assert_eq!(outcome.score as usize, console.prompts.len() - 1);
    assert!(console.lines.last().unwrap().starts_with("INCORRECT"));
}

#[tokio::test]
async fn kth_wrong_answer_scores_previous_answers() {
    let pairs = [("Q1?", "A1"), ("Q2?", "A2"), ("Q3?", "A3"), ("Q4?", "A4")];
    for k in 1..=pairs.len() {
        let (_repo, play) = seeded(&pairs).await;
        let mut console = ScriptedConsole::answering(&pairs);
        console.wrong_at = Some(k);

        let outcome = play.run_play_session(&mut console).await.unwrap();

        assert_eq!(outcome.state, PlayState::Lost);
        assert_eq!(outcome.score as usize, k - 1);
        assert_eq!(console.prompts.len(), k, "no prompt after the miss");
    }
}

#[tokio::test]
async fn empty_store_reports_nothing_to_ask() {
    let (_repo, play) = seeded(&[]).await;
    let mut console = ScriptedConsole::default();

    let outcome = play.run_play_session(&mut console).await.unwrap();

    assert_eq!(outcome.state, PlayState::Won);
    assert_eq!(outcome.score, 0);
    assert!(console.prompts.is_empty());
    assert_eq!(console.lines[0], "There are no quizzes to ask.");
}

#[tokio::test]
async fn quiz_deleted_mid_session_aborts_with_not_found() {
    let (repo, play) = seeded(&SCENARIO).await;
    let mut console = ScriptedConsole::answering(&SCENARIO);
    console.delete_others = Some(repo.clone());

    let err = play.run_play_session(&mut console).await.unwrap_err();

    let PlayError::RecordNotFound(missing) = err else {
        panic!("expected RecordNotFound, got {err:?}");
    };
    assert!(repo.get_quiz(missing).await.unwrap().is_none());
    assert_eq!(console.prompts.len(), 1);
}

#[tokio::test]
async fn closed_input_stops_the_session() {
    let (_repo, play) = seeded(&SCENARIO).await;
    let mut console = ScriptedConsole::default();

    let err = play.run_play_session(&mut console).await.unwrap_err();
    assert!(matches!(err, PlayError::Console(ConsoleError::Closed)));
}

#[tokio::test]
async fn single_test_reports_correct_and_incorrect() {
    let (_repo, play) = seeded(&SCENARIO).await;

    let mut console = ScriptedConsole::answering(&[("capital of France?", "PARIS")]);
    let outcome = play
        .run_single_test(&mut console, Some("2"))
        .await
        .unwrap();
    assert!(outcome.is_correct);
    assert_eq!(outcome.quiz_id, QuizId::new(2));
    assert_eq!(console.emphasized, vec![("Correct".to_string(), Emphasis::Success)]);

    let mut console = ScriptedConsole::answering(&[("2+2?", "5")]);
    let outcome = play
        .run_single_test(&mut console, Some("1"))
        .await
        .unwrap();
    assert!(!outcome.is_correct);
    assert_eq!(console.lines, vec!["Your answer is incorrect.".to_string()]);
}

#[tokio::test]
async fn single_test_rejects_bad_ids_without_prompting() {
    let (_repo, play) = seeded(&SCENARIO).await;
    let mut console = ScriptedConsole::default();

    let missing = play.run_single_test(&mut console, None).await.unwrap_err();
    assert!(matches!(
        missing,
        PlayError::Quiz(QuizServiceError::MissingIdentifier)
    ));

    let invalid = play
        .run_single_test(&mut console, Some("two"))
        .await
        .unwrap_err();
    assert!(matches!(
        invalid,
        PlayError::Quiz(QuizServiceError::InvalidIdentifier(_))
    ));

    let absent = play
        .run_single_test(&mut console, Some("99"))
        .await
        .unwrap_err();
    assert!(matches!(absent, PlayError::RecordNotFound(id) if id == QuizId::new(99)));

    assert!(console.prompts.is_empty());
}

#[tokio::test]
async fn questions_are_asked_with_a_single_question_mark() {
    let (_repo, play) = seeded(&[("Capital of Italy", "Rome")]).await;
    let mut console = ScriptedConsole::answering(&[("Capital of Italy?", "rome")]);

    let outcome = play
        .run_single_test(&mut console, Some("1"))
        .await
        .unwrap();
    assert!(outcome.is_correct);

    let (_repo, play) = seeded(&SCENARIO).await;
    let mut console = ScriptedConsole::answering(&SCENARIO);
    play.run_play_session(&mut console).await.unwrap();
    assert!(console.prompts.iter().all(|p| !p.ends_with("??")));
}
