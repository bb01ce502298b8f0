use std::path::Path;

use swot_core::models::Attempt;
use swot_core::scoring::record_attempt;
use swot_core::Quiz;

use crate::commands::common::{load_quizzes, open_store, resolve_quiz_index, save_quizzes};
use crate::error::CliError;

pub fn run_take(
    id: &str,
    answer_sheet: &str,
    password: Option<&str>,
    data_dir: &Path,
) -> Result<(), CliError> {
    let mut store = open_store(data_dir)?;
    let mut quizzes = load_quizzes(&store);
    let index = resolve_quiz_index(&quizzes, id)?;

    check_password(&quizzes[index], password)?;
    let answers = parse_answer_sheet(answer_sheet)?;

    let attempt = record_attempt(&mut quizzes[index], &answers).map_err(|error| match error {
        swot_core::Error::InvalidInput(message) => CliError::InvalidAnswers(message),
        other => CliError::Core(other),
    })?;
    save_quizzes(&mut store, &quizzes)?;

    for line in format_attempt_lines(&quizzes[index], &attempt) {
        println!("{line}");
    }
    Ok(())
}

fn check_password(quiz: &Quiz, presented: Option<&str>) -> Result<(), CliError> {
    if !quiz.is_locked() {
        return Ok(());
    }
    match presented {
        None => Err(CliError::PasswordRequired),
        Some(candidate) if quiz.password.as_deref() == Some(candidate) => Ok(()),
        Some(_) => Err(CliError::WrongPassword),
    }
}

/// Parse `2,1,-,3` into 0-based selections; `-` marks unanswered.
fn parse_answer_sheet(sheet: &str) -> Result<Vec<Option<usize>>, CliError> {
    sheet
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            if entry == "-" {
                return Ok(None);
            }
            let choice: usize = entry
                .parse()
                .map_err(|_| CliError::InvalidAnswers(format!("'{entry}' is not a number or -")))?;
            if choice == 0 {
                return Err(CliError::InvalidAnswers(
                    "answers are 1-based; 0 is not a choice".to_string(),
                ));
            }
            Ok(Some(choice - 1))
        })
        .collect()
}

fn format_attempt_lines(quiz: &Quiz, attempt: &Attempt) -> Vec<String> {
    let mut lines = vec![format!(
        "Score: {}/{} ({}%)",
        attempt.score,
        attempt.total,
        attempt.percent()
    )];

    for outcome in &attempt.outcomes {
        let question = &quiz.questions[outcome.question_index];
        let marker = if outcome.is_correct { "+" } else { "x" };
        let answer = outcome.selected.map_or_else(
            || "(unanswered)".to_string(),
            |selected| question.choices[selected].clone(),
        );
        if outcome.is_correct {
            lines.push(format!(
                "{marker} {}. {} -- {answer}",
                outcome.question_index + 1,
                question.prompt
            ));
        } else {
            lines.push(format!(
                "{marker} {}. {} -- {answer}; correct: {}",
                outcome.question_index + 1,
                question.prompt,
                question.choices[outcome.correct_index]
            ));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use swot_core::models::Question;

    fn quiz() -> Quiz {
        Quiz::new(
            "Capitals",
            vec![
                Question {
                    prompt: "Capital of France?".to_string(),
                    choices: vec!["Paris".to_string(), "Lyon".to_string()],
                    correct: 0,
                    image_url: None,
                },
                Question {
                    prompt: "Capital of Japan?".to_string(),
                    choices: vec!["Osaka".to_string(), "Tokyo".to_string()],
                    correct: 1,
                    image_url: None,
                },
            ],
        )
    }

    #[test]
    fn parse_answer_sheet_is_one_based_with_skips() {
        let answers = parse_answer_sheet("2, 1, -").unwrap();
        assert_eq!(answers, vec![Some(1), Some(0), None]);
    }

    #[test]
    fn parse_answer_sheet_rejects_zero_and_garbage() {
        assert!(matches!(
            parse_answer_sheet("0,1"),
            Err(CliError::InvalidAnswers(_))
        ));
        assert!(matches!(
            parse_answer_sheet("one"),
            Err(CliError::InvalidAnswers(_))
        ));
    }

    #[test]
    fn check_password_gates_locked_quizzes() {
        let mut quiz = quiz();
        assert!(check_password(&quiz, None).is_ok());

        quiz.password = Some("secret".to_string());
        assert!(matches!(
            check_password(&quiz, None),
            Err(CliError::PasswordRequired)
        ));
        assert!(matches!(
            check_password(&quiz, Some("nope")),
            Err(CliError::WrongPassword)
        ));
        assert!(check_password(&quiz, Some("secret")).is_ok());
    }

    #[test]
    fn run_take_records_attempt_in_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(dir.path()).unwrap();
        let quiz = quiz();
        let id = quiz.id;
        save_quizzes(&mut store, &[quiz]).unwrap();

        run_take(&id.as_str(), "1,1", None, dir.path()).unwrap();

        let reloaded = load_quizzes(&open_store(dir.path()).unwrap());
        assert_eq!(reloaded[0].history.len(), 1);
        assert_eq!(reloaded[0].history[0].score, 1);
        assert_eq!(reloaded[0].version, 2);
    }

    #[test]
    fn format_attempt_lines_reveals_correct_answer_on_misses_only() {
        let mut quiz = quiz();
        let attempt = record_attempt(&mut quiz, &[Some(0), Some(0)]).unwrap();

        let lines = format_attempt_lines(&quiz, &attempt);
        assert!(lines[0].starts_with("Score: 1/2"));
        assert!(lines[1].starts_with("+ 1."));
        assert!(!lines[1].contains("correct:"));
        assert!(lines[2].starts_with("x 2."));
        assert!(lines[2].contains("correct: Tokyo"));
    }
}
