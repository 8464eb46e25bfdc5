use tera::{Context, Tera};
use weather_core::{AddOutcome, WeatherSnapshot};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// One-shot message shown above the city list after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AlreadyAdded,
    NotFound,
    Blank,
}

impl Notice {
    pub fn from_outcome(outcome: &AddOutcome) -> Option<Self> {
        match outcome {
            AddOutcome::Added(_) => None,
            AddOutcome::AlreadyAdded => Some(Notice::AlreadyAdded),
            AddOutcome::NotFound => Some(Notice::NotFound),
            AddOutcome::Blank => Some(Notice::Blank),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::AlreadyAdded => "The city has already been added to the list!",
            Notice::NotFound => "The city doesn't exist!",
            Notice::Blank => "Please enter a city name.",
        }
    }
}

/// Compiled page templates.
#[derive(Debug)]
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { tera })
    }

    pub fn index(
        &self,
        cities: &[WeatherSnapshot],
        notice: Option<Notice>,
    ) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("cities", cities);
        context.insert("notice", &notice.map(|n| n.message()));

        self.tera.render("index.html", &context)
    }
}
