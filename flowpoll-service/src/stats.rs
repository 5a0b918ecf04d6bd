//! Per-question answer aggregation for the admin results view.

use flowpoll_types::{ChoiceId, QuestionId, Response, Survey};

/// How often one choice was picked.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionStat {
    pub option_id: ChoiceId,
    pub text: String,
    pub count: usize,
    /// Share of this question's answers, 0.0 when nobody answered it.
    pub percentage: f64,
}

/// Aggregated answers for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionStat {
    pub question_id: QuestionId,
    pub text: String,
    /// Answers recorded for this question, including picks of choices that
    /// have since been removed.
    pub total_answers: usize,
    pub options: Vec<OptionStat>,
}

/// Aggregate `responses` per question of `survey`, in question list order.
///
/// Branching means not every response answers every question, so each
/// question's percentages are relative to its own answer count, not the
/// number of responses.
pub fn question_stats(survey: &Survey, responses: &[Response]) -> Vec<QuestionStat> {
    survey
        .questions
        .iter()
        .map(|question| {
            let answers: Vec<_> = responses
                .iter()
                .filter_map(|response| response.answer_for(&question.id))
                .collect();
            let total = answers.len();

            let options = question
                .options
                .iter()
                .map(|choice| {
                    let count = answers
                        .iter()
                        .filter(|answer| answer.option_id == choice.id)
                        .count();
                    let percentage = if total == 0 {
                        0.0
                    } else {
                        count as f64 / total as f64 * 100.0
                    };
                    OptionStat {
                        option_id: choice.id.clone(),
                        text: choice.text.clone(),
                        count,
                        percentage,
                    }
                })
                .collect();

            QuestionStat {
                question_id: question.id.clone(),
                text: question.text.clone(),
                total_answers: total,
                options,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowpoll_types::{Answer, Choice, Question, UserId};

    fn survey() -> Survey {
        Survey::new(
            "Stats",
            "fixture",
            vec![
                Question::new("Q1", vec![Choice::new("yes"), Choice::new("no")]),
                Question::new("Q2", vec![Choice::new("often")]),
            ],
        )
    }

    fn response_picking(survey: &Survey, picks: &[(usize, usize)]) -> Response {
        let answers = picks
            .iter()
            .map(|&(q, c)| {
                Answer::new(
                    survey.questions[q].id.clone(),
                    survey.questions[q].options[c].id.clone(),
                )
            })
            .collect();
        Response::new(survey.id.clone(), UserId::generate(), "A", "B", answers)
    }

    #[test]
    fn percentages_are_relative_to_each_questions_answers() {
        let survey = survey();
        let responses = vec![
            response_picking(&survey, &[(0, 0), (1, 0)]),
            response_picking(&survey, &[(0, 0)]),
            response_picking(&survey, &[(0, 1)]),
        ];

        let stats = question_stats(&survey, &responses);

        assert_eq!(stats[0].total_answers, 3);
        assert_eq!(stats[0].options[0].count, 2);
        assert!((stats[0].options[0].percentage - 66.666).abs() < 0.01);
        assert_eq!(stats[0].options[1].count, 1);

        // Only one response reached Q2; its single pick is 100%.
        assert_eq!(stats[1].total_answers, 1);
        assert!((stats[1].options[0].percentage - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unanswered_question_reports_zeroes() {
        let survey = survey();
        let stats = question_stats(&survey, &[]);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].total_answers, 0);
        assert_eq!(stats[0].options[0].count, 0);
        assert_eq!(stats[0].options[0].percentage, 0.0);
    }

    #[test]
    fn removed_choice_still_counts_toward_the_total() {
        let survey = survey();
        let mut response = response_picking(&survey, &[(0, 1)]);
        response.answers[0].option_id = ChoiceId::generate();

        let stats = question_stats(&survey, &[response]);
        assert_eq!(stats[0].total_answers, 1);
        assert!(stats[0].options.iter().all(|option| option.count == 0));
    }
}
