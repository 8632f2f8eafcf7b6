//! Training record model
//!
//! A record says "I trained <type> on <day>". Both fields come from fixed
//! sets, so they are enums here rather than free text. The remote table
//! stores them as their Portuguese labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a day or training type does not belong to its fixed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown weekday: {0:?}")]
    UnknownDay(String),

    #[error("unknown training type: {0:?}")]
    UnknownType(String),

    #[error("a weekday must be selected")]
    MissingDay,

    #[error("a training type must be selected")]
    MissingType,
}

/// Fold a label for alias matching: lowercase, accents stripped
fn fold(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' | 'Ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Weekday
// ─────────────────────────────────────────────────────────────────────────────

/// Day of the week, in display order (the week starts on Sunday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "Domingo")]
    Domingo,
    #[serde(rename = "Segunda-feira")]
    Segunda,
    #[serde(rename = "Terça-feira")]
    Terca,
    #[serde(rename = "Quarta-feira")]
    Quarta,
    #[serde(rename = "Quinta-feira")]
    Quinta,
    #[serde(rename = "Sexta-feira")]
    Sexta,
    #[serde(rename = "Sábado")]
    Sabado,
}

impl Weekday {
    /// All weekdays in fixed display order
    pub const ALL: [Weekday; 7] = [
        Weekday::Domingo,
        Weekday::Segunda,
        Weekday::Terca,
        Weekday::Quarta,
        Weekday::Quinta,
        Weekday::Sexta,
        Weekday::Sabado,
    ];

    /// Label as stored in the remote table
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Domingo => "Domingo",
            Weekday::Segunda => "Segunda-feira",
            Weekday::Terca => "Terça-feira",
            Weekday::Quarta => "Quarta-feira",
            Weekday::Quinta => "Quinta-feira",
            Weekday::Sexta => "Sexta-feira",
            Weekday::Sabado => "Sábado",
        }
    }

    /// Position in [`Weekday::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Next day, wrapping Saturday back to Sunday
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous day, wrapping Sunday back to Saturday
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Lenient lookup used by the CLI: "quarta", "TERCA", "Sábado" all match
    pub fn from_alias(input: &str) -> Result<Self, ValidationError> {
        if let Ok(day) = input.parse() {
            return Ok(day);
        }
        let folded = fold(input);
        Self::ALL
            .into_iter()
            .find(|day| {
                let label = fold(day.label());
                label == folded || label.split('-').next() == Some(folded.as_str())
            })
            .ok_or_else(|| ValidationError::UnknownDay(input.to_string()))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    /// Exact label match, as the remote table stores it
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.label() == s)
            .ok_or_else(|| ValidationError::UnknownDay(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Training type
// ─────────────────────────────────────────────────────────────────────────────

/// Training category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrainingType {
    Peito,
    Costas,
    Pernas,
    Ombros,
    #[serde(rename = "Braços")]
    Bracos,
    Cardio,
}

impl TrainingType {
    /// All training types in fixed display order
    pub const ALL: [TrainingType; 6] = [
        TrainingType::Peito,
        TrainingType::Costas,
        TrainingType::Pernas,
        TrainingType::Ombros,
        TrainingType::Bracos,
        TrainingType::Cardio,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TrainingType::Peito => "Peito",
            TrainingType::Costas => "Costas",
            TrainingType::Pernas => "Pernas",
            TrainingType::Ombros => "Ombros",
            TrainingType::Bracos => "Braços",
            TrainingType::Cardio => "Cardio",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Lenient lookup used by the CLI ("bracos", "CARDIO")
    pub fn from_alias(input: &str) -> Result<Self, ValidationError> {
        let folded = fold(input);
        Self::ALL
            .into_iter()
            .find(|kind| fold(kind.label()) == folded)
            .ok_or_else(|| ValidationError::UnknownType(input.to_string()))
    }
}

impl fmt::Display for TrainingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TrainingType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| ValidationError::UnknownType(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// Server-assigned primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingId(pub i64);

impl fmt::Display for TrainingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logged workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub id: TrainingId,
    pub day: Weekday,
    #[serde(rename = "type")]
    pub kind: TrainingType,
    /// Creation date as shown to the user (dd/mm/yyyy); never used for ordering
    pub date: String,
}

/// Format a creation date the way the tracker displays it (pt-BR)
pub fn format_record_date(date: chrono::NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Today's date in record format, local time
pub fn today_label() -> String {
    format_record_date(chrono::Local::now().date_naive())
}

/// Both selections checked into a pair the gateway can insert
pub fn require_selection(
    day: Option<Weekday>,
    kind: Option<TrainingType>,
) -> Result<(Weekday, TrainingType), ValidationError> {
    let day = day.ok_or(ValidationError::MissingDay)?;
    let kind = kind.ok_or(ValidationError::MissingType)?;
    Ok((day, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_labels_roundtrip_through_from_str() {
        for day in Weekday::ALL {
            assert_eq!(day.label().parse::<Weekday>(), Ok(day));
        }
        assert_eq!(
            "segunda".parse::<Weekday>(),
            Err(ValidationError::UnknownDay("segunda".to_string()))
        );
    }

    #[test]
    fn test_weekday_aliases() {
        assert_eq!(Weekday::from_alias("quarta"), Ok(Weekday::Quarta));
        assert_eq!(Weekday::from_alias("TERCA"), Ok(Weekday::Terca));
        assert_eq!(Weekday::from_alias("sabado"), Ok(Weekday::Sabado));
        assert_eq!(Weekday::from_alias("Sábado"), Ok(Weekday::Sabado));
        assert_eq!(Weekday::from_alias("quinta-feira"), Ok(Weekday::Quinta));
        assert!(Weekday::from_alias("feira").is_err());
    }

    #[test]
    fn test_type_aliases() {
        assert_eq!(TrainingType::from_alias("bracos"), Ok(TrainingType::Bracos));
        assert_eq!(TrainingType::from_alias("CARDIO"), Ok(TrainingType::Cardio));
        assert_eq!(
            TrainingType::from_alias("yoga"),
            Err(ValidationError::UnknownType("yoga".to_string()))
        );
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(Weekday::Sabado.next(), Weekday::Domingo);
        assert_eq!(Weekday::Domingo.prev(), Weekday::Sabado);
        assert_eq!(TrainingType::Cardio.next(), TrainingType::Peito);
        assert_eq!(TrainingType::Peito.prev(), TrainingType::Cardio);
    }

    #[test]
    fn test_record_json_shape() {
        let json = r#"{"id":3,"day":"Segunda-feira","type":"Cardio","date":"01/02/2024"}"#;
        let record: TrainingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, TrainingId(3));
        assert_eq!(record.day, Weekday::Segunda);
        assert_eq!(record.kind, TrainingType::Cardio);

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["type"], "Cardio");
        assert_eq!(back["day"], "Segunda-feira");
    }

    #[test]
    fn test_unknown_label_rejected_by_serde() {
        let json = r#"{"id":1,"day":"Funday","type":"Cardio","date":""}"#;
        assert!(serde_json::from_str::<TrainingRecord>(json).is_err());
    }

    #[test]
    fn test_require_selection() {
        assert_eq!(
            require_selection(None, Some(TrainingType::Cardio)),
            Err(ValidationError::MissingDay)
        );
        assert_eq!(
            require_selection(Some(Weekday::Quarta), None),
            Err(ValidationError::MissingType)
        );
        assert_eq!(
            require_selection(Some(Weekday::Quarta), Some(TrainingType::Cardio)),
            Ok((Weekday::Quarta, TrainingType::Cardio))
        );
    }

    #[test]
    fn test_date_format() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_record_date(date), "07/03/2024");
    }
}
