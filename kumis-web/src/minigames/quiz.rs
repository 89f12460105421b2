use super::{next_label, question_label};
use crate::i18n::t;
use kumis_game::minigame::{QuizItem, QuizRound};
use kumis_game::{Content, MiniGame, MiniGameAction};
use yew::prelude::*;

/// Option-picking games flattened to one shape for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub prompt: String,
    pub options: Vec<String>,
    pub image: Option<String>,
    pub selected: Option<usize>,
    pub correct: usize,
    pub explanation: String,
    pub index: usize,
    pub total: usize,
}

impl QuizView {
    fn build<Q: QuizItem>(
        round: &QuizRound<Q>,
        describe: impl FnOnce(&Q) -> (String, Vec<String>, Option<String>),
    ) -> Option<Self> {
        let question = round.current()?;
        let (prompt, options, image) = describe(question);
        Some(Self {
            prompt,
            options,
            image,
            selected: round.selected(),
            correct: question.correct_index(),
            explanation: question.explanation().to_string(),
            index: round.index(),
            total: round.len(),
        })
    }

    /// `None` when the game is not a quiz or has no question left.
    #[must_use]
    pub fn from_game(game: &MiniGame, content: &Content) -> Option<Self> {
        match game {
            MiniGame::MultipleChoice(round) => Self::build(round, |q| {
                (q.question.clone(), q.options.clone(), q.image.clone())
            }),
            MiniGame::TrueFalse(round) => Self::build(round, |q| {
                (
                    q.statement.clone(),
                    vec![t("game.true"), t("game.false")],
                    q.image.clone(),
                )
            }),
            MiniGame::PickWord(round) => Self::build(round, |q| {
                (q.sentence.clone(), q.options.clone(), q.image.clone())
            }),
            MiniGame::Sorting(round) => Self::build(round, |q| {
                let names = q
                    .options
                    .iter()
                    .map(|id| content.fungi_by_id(id).map_or_else(|| id.clone(), |f| f.name.clone()))
                    .collect();
                let image = content.fungi_by_id(&q.correct).map(|f| f.image.clone());
                (q.description.clone(), names, image)
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn option_class(&self, idx: usize) -> Option<&'static str> {
        let selected = self.selected?;
        if idx == self.correct {
            Some("is-correct")
        } else if idx == selected {
            Some("is-wrong")
        } else {
            None
        }
    }
}

pub fn render(view: &QuizView, on_action: &Callback<MiniGameAction>) -> Html {
    let answered = view.selected.is_some();
    let options = view.options.iter().enumerate().map(|(idx, label)| {
        let onclick = on_action.reform(move |_: MouseEvent| MiniGameAction::Select(idx));
        html! {
            <li>
                <button
                    type="button"
                    class={classes!("btn", "quiz-option", view.option_class(idx))}
                    disabled={answered}
                    data-testid={format!("quiz-option-{idx}")}
                    {onclick}
                >
                    { label.clone() }
                </button>
            </li>
        }
    });
    let on_next = on_action.reform(|_: MouseEvent| MiniGameAction::Next);

    html! {
        <div class="quiz" data-testid="quiz">
            <p class="text-xs opacity-60">{ question_label(view.index, view.total) }</p>
            if let Some(src) = view.image.clone() {
                <img class="quiz__image" {src} alt="" />
            }
            <p class="quiz__prompt" data-testid="quiz-prompt">{ view.prompt.clone() }</p>
            <ul class="quiz__options">{ for options }</ul>
            if answered {
                <div class="quiz__feedback" role="status" data-testid="quiz-feedback">
                    <strong>
                        { if view.selected == Some(view.correct) { t("game.correct") } else { t("game.wrong") } }
                    </strong>
                    <p>{ view.explanation.clone() }</p>
                    <button type="button" class="btn btn-primary" data-testid="quiz-next" onclick={on_next}>
                        { next_label(view.index, view.total) }
                    </button>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kumis_game::content::ChoiceQuestion;
    use kumis_game::MiniGameKind;

    fn round() -> MiniGame {
        MiniGame::MultipleChoice(QuizRound::new(
            MiniGameKind::MultipleChoice,
            vec![ChoiceQuestion {
                question: "Ragi roti adalah?".into(),
                options: vec!["Kapang".into(), "Khamir".into(), "Bakteri".into()],
                correct: 1,
                explanation: "Saccharomyces adalah khamir.".into(),
                image: None,
            }],
        ))
    }

    #[test]
    fn marks_correct_and_wrong_after_selection() {
        let mut game = round();
        let view = QuizView::from_game(&game, &Content::default()).unwrap();
        assert_eq!(view.option_class(1), None);
        game.apply(MiniGameAction::Select(2));
        let view = QuizView::from_game(&game, &Content::default()).unwrap();
        assert_eq!(view.option_class(1), Some("is-correct"));
        assert_eq!(view.option_class(2), Some("is-wrong"));
        assert_eq!(view.option_class(0), None);
    }
}
