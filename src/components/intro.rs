use super::view::{rich, Action, Element};

const TITLE_ILLUSTRATION: &str = "app/assets/img/alerts/alert-bell-confetti-illustration.png";

const EDUCATION_ILLUSTRATIONS: [&str; 3] = [
    "app/assets/img/alerts/education-illustration-01-raw-data.png",
    "app/assets/img/alerts/education-illustration-02-goal.png",
    "app/assets/img/alerts/education-illustration-03-progress.png",
];

/// Illustrated header of the create and edit modals.
pub struct AlertModalTitle;

impl AlertModalTitle {
    pub fn render(text: &str) -> Element {
        Element::section(
            "ml-auto mr-auto my4 pb2 text-centered",
            vec![
                Element::Image {
                    src: TITLE_ILLUSTRATION.to_string(),
                },
                Element::heading(1, text),
            ],
        )
    }
}

/// Onboarding panel shown once per user before their first alert.
pub struct AlertEducationalScreen;

impl AlertEducationalScreen {
    pub fn render() -> Element {
        let captions = [
            t!("education.raw_data"),
            t!("education.goal"),
            t!("education.progress"),
        ];
        let examples = EDUCATION_ILLUSTRATIONS
            .iter()
            .zip(captions.iter())
            .map(|(src, caption)| {
                Element::section(
                    "flex align-center",
                    vec![
                        Element::Image {
                            src: src.to_string(),
                        },
                        Element::paragraph(rich(caption, &[])),
                    ],
                )
            })
            .collect();

        Element::section(
            "pt2 pb4 ml-auto mr-auto text-centered",
            vec![
                Element::heading(1, t!("education.title").to_string()),
                Element::heading(3, t!("education.subtitle").to_string()),
                Element::section("text-paragraph pt4", examples),
                Element::primary_button(t!("education.proceed").to_string(), Action::Proceed),
            ],
        )
    }
}
