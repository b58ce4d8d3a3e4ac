//! Build Bank use case.
//!
//! Runs once at startup: merges the fixed lead-in questions with the rows
//! supplied by the [`QuestionSource`] port into one immutable
//! [`QuestionBank`]. A failing source is fatal (the service never starts
//! with a partial bank), while degraded individual rows or conditions are
//! logged and kept out of the way by the domain builder.

use crate::ports::question_source::{QuestionSource, SourceError};
use intake_domain::{BankBuilder, QuestionBank, RawQuestionRow};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort startup.
#[derive(Error, Debug)]
pub enum BuildBankError {
    #[error("Failed to load question source: {0}")]
    Source(#[from] SourceError),
}

/// The fixed lead-in questions, prepended ahead of the sheet-sourced bank
/// in this exact order.
///
/// The first question's condition references the relation answer collected
/// by the static front-end before this engine is invoked at all; that
/// reference never resolves inside the bank and is evaluated purely
/// against the caller-supplied previous answer.
pub fn lead_in_questions() -> Vec<RawQuestionRow> {
    vec![
        RawQuestionRow::new(
            "1",
            "Wat is uw relatie tot die ander?",
            vec![
                "ouder/verzorger".to_string(),
                "echtgeno(o)t(e)/partner".to_string(),
                "(schoon)zoon/(schoon)dochter".to_string(),
                "mantelzorger/verzorger/familielid".to_string(),
            ],
            Some("1=ander".to_string()),
        ),
        RawQuestionRow::new(
            "2",
            "Heeft u voldoende tijd (maximaal 10 minuten) om een aantal vragen \
             over uw klacht te beantwoorden?",
            vec!["ja".to_string(), "nee".to_string()],
            None,
        ),
        RawQuestionRow::new(
            "3",
            "Op welk van de volgende gebieden heeft uw klacht betrekking? \
             (er zijn meerdere antwoorden mogelijk)",
            vec![
                "stem".to_string(),
                "keel".to_string(),
                "spraak".to_string(),
                "niet vloeiend spreken".to_string(),
                "taal".to_string(),
                "slikken".to_string(),
                "adem".to_string(),
                "gehoor".to_string(),
                "mondgewoonten".to_string(),
                "neurologisch probleem".to_string(),
                "oncologisch probleem".to_string(),
                "psychisch/psychiatrisch probleem".to_string(),
                "leer-/ontwikkelingsprobleem".to_string(),
                "anders".to_string(),
            ],
            None,
        ),
        RawQuestionRow::new(
            "4",
            "Is er door uw huisarts of specialist een diagnose gesteld?",
            vec!["ja".to_string(), "nee".to_string()],
            Some(
                "4=neurologisch probleem,oncologisch probleem,\
                 psychisch/psychiatrisch probleem,leer-/ontwikkelingsprobleem,anders"
                    .to_string(),
            ),
        ),
        RawQuestionRow::new(
            "5",
            "Hoe luidde die diagnose?",
            vec![],
            Some("5=ja".to_string()),
        ),
    ]
}

/// Use case for building the question bank at startup.
pub struct BuildBankUseCase {
    source: Arc<dyn QuestionSource>,
}

impl BuildBankUseCase {
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self { source }
    }

    /// Load the source rows and build the merged bank: lead-ins first,
    /// then source rows in their given order.
    pub fn execute(&self) -> Result<QuestionBank, BuildBankError> {
        let rows = self.source.load()?;
        info!("Loaded {} question rows from source", rows.len());

        let (bank, warnings) = BankBuilder::new()
            .extend(lead_in_questions())
            .extend(rows)
            .build();

        for warning in &warnings {
            warn!("Degraded question condition: {}", warning);
        }
        info!("Question bank built with {} questions", bank.len());

        Ok(bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource {
        rows: Vec<RawQuestionRow>,
    }

    impl QuestionSource for StaticSource {
        fn load(&self) -> Result<Vec<RawQuestionRow>, SourceError> {
            Ok(self.rows.clone())
        }
    }

    struct FailingSource;

    impl QuestionSource for FailingSource {
        fn load(&self) -> Result<Vec<RawQuestionRow>, SourceError> {
            Err(SourceError::Unavailable("no such file".to_string()))
        }
    }

    #[test]
    fn test_lead_ins_precede_source_rows() {
        let source = StaticSource {
            rows: vec![RawQuestionRow::new("6", "Sinds wanneer?", vec![], None)],
        };
        let bank = BuildBankUseCase::new(Arc::new(source)).execute().unwrap();

        assert_eq!(bank.len(), 6);
        assert_eq!(bank.get(1).unwrap().index(), "1");
        assert_eq!(bank.get(5).unwrap().index(), "5");
        assert_eq!(bank.get(6).unwrap().index(), "6");
    }

    #[test]
    fn test_blank_source_rows_do_not_appear() {
        let source = StaticSource {
            rows: vec![
                RawQuestionRow::new("6", "", vec![], None),
                RawQuestionRow::new("7", "Echte vraag", vec![], None),
            ],
        };
        let bank = BuildBankUseCase::new(Arc::new(source)).execute().unwrap();

        assert_eq!(bank.len(), 6);
        assert_eq!(bank.get(6).unwrap().index(), "7");
    }

    #[test]
    fn test_source_failure_is_fatal() {
        let result = BuildBankUseCase::new(Arc::new(FailingSource)).execute();
        assert!(matches!(result, Err(BuildBankError::Source(_))));
    }

    #[test]
    fn test_lead_in_conditions_are_normalized() {
        let source = StaticSource { rows: vec![] };
        let bank = BuildBankUseCase::new(Arc::new(source)).execute().unwrap();

        // "5=ja" on the diagnosis question becomes a singleton answer set.
        let diagnosis = bank.get(5).unwrap();
        let condition = diagnosis.condition().unwrap();
        assert!(condition.is_met(Some("ja")));
        assert!(!condition.is_met(Some("nee")));
    }
}
