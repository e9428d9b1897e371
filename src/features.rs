use std::fmt;

use crate::error::PredictError;

// ---------------------------------------------------------------------------
// Feature – the closed set of form inputs
// ---------------------------------------------------------------------------

/// Value domain of a single feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureKind {
    /// Integer-stepped slider between `min` and `max` (inclusive).
    Numeric { min: f64, max: f64 },
    /// One of a fixed set of codes.
    Categorical { choices: &'static [f64] },
}

/// One of the 14 student-performance inputs.
///
/// The declaration order is the canonical column order every model artifact
/// is assumed to expect unless a feature-order artifact says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Attendance,
    MidtermScore,
    FinalScore,
    AssignmentsAvg,
    QuizzesAvg,
    ParticipationScore,
    ProjectsScore,
    TotalScore,
    StudyHoursPerWeek,
    ExtracurricularActivities,
    InternetAccessAtHome,
    ParentEducationLevel,
    StressLevel,
    SleepHoursPerNight,
}

pub const FEATURE_COUNT: usize = 14;

const BINARY: &[f64] = &[0.0, 1.0];
const EDUCATION_LEVELS: &[f64] = &[0.0, 1.0, 2.0, 3.0];

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Attendance,
        Feature::MidtermScore,
        Feature::FinalScore,
        Feature::AssignmentsAvg,
        Feature::QuizzesAvg,
        Feature::ParticipationScore,
        Feature::ProjectsScore,
        Feature::TotalScore,
        Feature::StudyHoursPerWeek,
        Feature::ExtracurricularActivities,
        Feature::InternetAccessAtHome,
        Feature::ParentEducationLevel,
        Feature::StressLevel,
        Feature::SleepHoursPerNight,
    ];

    /// Position in the canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name as the trained artifacts know it.
    pub fn column_name(self) -> &'static str {
        match self {
            Feature::Attendance => "Attendance (%)",
            Feature::MidtermScore => "Midterm_Score",
            Feature::FinalScore => "Final_Score",
            Feature::AssignmentsAvg => "Assignments_Avg",
            Feature::QuizzesAvg => "Quizzes_Avg",
            Feature::ParticipationScore => "Participation_Score",
            Feature::ProjectsScore => "Projects_Score",
            Feature::TotalScore => "Total_Score",
            Feature::StudyHoursPerWeek => "Study_Hours_per_Week",
            Feature::ExtracurricularActivities => "Extracurricular_Activities",
            Feature::InternetAccessAtHome => "Internet_Access_at_Home",
            Feature::ParentEducationLevel => "Parent_Education_Level",
            Feature::StressLevel => "Stress_Level (1-10)",
            Feature::SleepHoursPerNight => "Sleep_Hours_per_Night",
        }
    }

    /// Label shown next to the form control.
    pub fn label(self) -> &'static str {
        match self {
            Feature::Attendance => "Attendance (%)",
            Feature::MidtermScore => "Midterm Score",
            Feature::FinalScore => "Final Score",
            Feature::AssignmentsAvg => "Assignments Average",
            Feature::QuizzesAvg => "Quizzes Average",
            Feature::ParticipationScore => "Participation Score",
            Feature::ProjectsScore => "Projects Score",
            Feature::TotalScore => "Total Score",
            Feature::StudyHoursPerWeek => "Study Hours per Week",
            Feature::ExtracurricularActivities => "Extracurricular Activities (0/1)",
            Feature::InternetAccessAtHome => "Internet Access at Home (0/1)",
            Feature::ParentEducationLevel => "Parent Education Level (0-3)",
            Feature::StressLevel => "Stress Level (1-10)",
            Feature::SleepHoursPerNight => "Sleep Hours per Night",
        }
    }

    pub fn kind(self) -> FeatureKind {
        match self {
            Feature::StudyHoursPerWeek => FeatureKind::Numeric { min: 0.0, max: 40.0 },
            Feature::ExtracurricularActivities | Feature::InternetAccessAtHome => {
                FeatureKind::Categorical { choices: BINARY }
            }
            Feature::ParentEducationLevel => FeatureKind::Categorical {
                choices: EDUCATION_LEVELS,
            },
            Feature::StressLevel => FeatureKind::Numeric { min: 1.0, max: 10.0 },
            Feature::SleepHoursPerNight => FeatureKind::Numeric { min: 0.0, max: 12.0 },
            _ => FeatureKind::Numeric { min: 0.0, max: 100.0 },
        }
    }

    /// Initial form value.
    pub fn default_value(self) -> f64 {
        match self {
            Feature::Attendance => 85.0,
            Feature::MidtermScore => 70.0,
            Feature::FinalScore => 75.0,
            Feature::AssignmentsAvg => 80.0,
            Feature::QuizzesAvg => 70.0,
            Feature::ParticipationScore => 75.0,
            Feature::ProjectsScore => 80.0,
            Feature::TotalScore => 78.0,
            Feature::StudyHoursPerWeek => 15.0,
            Feature::ExtracurricularActivities
            | Feature::InternetAccessAtHome
            | Feature::ParentEducationLevel => 0.0,
            Feature::StressLevel => 5.0,
            Feature::SleepHoursPerNight => 7.0,
        }
    }

    /// Bring `value` into this feature's domain.
    fn coerce(self, value: f64) -> f64 {
        let value = if value.is_nan() {
            self.default_value()
        } else {
            value
        };
        match self.kind() {
            FeatureKind::Numeric { min, max } => value.clamp(min, max),
            FeatureKind::Categorical { choices } => choices
                .iter()
                .copied()
                .min_by(|a, b| (a - value).abs().total_cmp(&(b - value).abs()))
                .unwrap_or(value),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// FeatureRow – the values of one form submission
// ---------------------------------------------------------------------------

/// One value per [`Feature`], always inside the feature's domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    values: [f64; FEATURE_COUNT],
}

impl Default for FeatureRow {
    fn default() -> Self {
        Self {
            values: Feature::ALL.map(Feature::default_value),
        }
    }
}

impl FeatureRow {
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    /// Store `value`, clamping numeric features and snapping categorical
    /// ones to the nearest allowed code.
    pub fn set(&mut self, feature: Feature, value: f64) {
        self.values[feature.index()] = feature.coerce(value);
    }

    #[cfg(test)]
    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        self.set(feature, value);
        self
    }

    /// `(feature, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

// ---------------------------------------------------------------------------
// FeatureTable – a named single-row table
// ---------------------------------------------------------------------------

/// How [`FeatureTable::select`] treats row columns the order does not name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnPolicy {
    /// Drop them silently.
    #[default]
    Lenient,
    /// Reject them with [`PredictError::ColumnMismatch`].
    Strict,
}

/// Column names paired with the values of a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureTable {
    /// Build the table in canonical column order.
    pub fn from_row(row: &FeatureRow) -> Self {
        let (columns, values) = row
            .iter()
            .map(|(f, v)| (f.column_name().to_string(), v))
            .unzip();
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    /// Reorder/select columns so they match `order` exactly.
    pub fn select<S: AsRef<str>>(
        &self,
        order: &[S],
        policy: ColumnPolicy,
    ) -> Result<FeatureTable, PredictError> {
        let missing: Vec<String> = order
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| self.value(name).is_none())
            .map(|name| name.to_string())
            .collect();

        let unexpected: Vec<String> = match policy {
            ColumnPolicy::Lenient => Vec::new(),
            ColumnPolicy::Strict => self
                .columns
                .iter()
                .filter(|c| !order.iter().any(|o| o.as_ref() == c.as_str()))
                .cloned()
                .collect(),
        };

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(PredictError::ColumnMismatch {
                missing,
                unexpected,
            });
        }

        let (columns, values) = order
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                self.value(name).map(|v| (name.to_string(), v))
            })
            .unzip();
        Ok(FeatureTable { columns, values })
    }

    /// Numeric matrix handed to scalers and models (one row).
    pub fn to_matrix(&self) -> Vec<Vec<f64>> {
        vec![self.values.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_columns_are_fixed() {
        let names: Vec<&str> = Feature::ALL.iter().map(|f| f.column_name()).collect();
        assert_eq!(
            names,
            [
                "Attendance (%)",
                "Midterm_Score",
                "Final_Score",
                "Assignments_Avg",
                "Quizzes_Avg",
                "Participation_Score",
                "Projects_Score",
                "Total_Score",
                "Study_Hours_per_Week",
                "Extracurricular_Activities",
                "Internet_Access_at_Home",
                "Parent_Education_Level",
                "Stress_Level (1-10)",
                "Sleep_Hours_per_Night",
            ]
        );
        for (i, f) in Feature::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn table_column_order_ignores_values() {
        let a = FeatureTable::from_row(&FeatureRow::default());
        let b = FeatureTable::from_row(
            &FeatureRow::default()
                .with(Feature::Attendance, 3.0)
                .with(Feature::SleepHoursPerNight, 12.0)
                .with(Feature::ParentEducationLevel, 3.0),
        );
        assert_eq!(a.columns(), b.columns());
        assert_eq!(a.columns().len(), FEATURE_COUNT);
        assert_eq!(b.values()[0], 3.0);
    }

    #[test]
    fn defaults_match_form() {
        let row = FeatureRow::default();
        assert_eq!(row.get(Feature::Attendance), 85.0);
        assert_eq!(row.get(Feature::TotalScore), 78.0);
        assert_eq!(row.get(Feature::StressLevel), 5.0);
        assert_eq!(row.get(Feature::SleepHoursPerNight), 7.0);
    }

    #[test]
    fn set_keeps_values_in_domain() {
        let mut row = FeatureRow::default();
        row.set(Feature::Attendance, 140.0);
        row.set(Feature::StressLevel, 0.0);
        row.set(Feature::StudyHoursPerWeek, -3.0);
        row.set(Feature::ParentEducationLevel, 2.6);
        row.set(Feature::InternetAccessAtHome, 7.0);
        row.set(Feature::MidtermScore, f64::NAN);

        assert_eq!(row.get(Feature::Attendance), 100.0);
        assert_eq!(row.get(Feature::StressLevel), 1.0);
        assert_eq!(row.get(Feature::StudyHoursPerWeek), 0.0);
        assert_eq!(row.get(Feature::ParentEducationLevel), 3.0);
        assert_eq!(row.get(Feature::InternetAccessAtHome), 1.0);
        assert_eq!(row.get(Feature::MidtermScore), 70.0);
    }

    #[test]
    fn select_reorders() {
        let table = FeatureTable::from_row(&FeatureRow::default());
        let picked = table
            .select(&["Total_Score", "Attendance (%)"], ColumnPolicy::Lenient)
            .unwrap();
        assert_eq!(picked.columns(), ["Total_Score", "Attendance (%)"]);
        assert_eq!(picked.values(), [78.0, 85.0]);
    }

    #[test]
    fn select_twice_is_select_once() {
        let table = FeatureTable::from_row(&FeatureRow::default());
        let mut order: Vec<&str> = Feature::ALL.iter().map(|f| f.column_name()).collect();
        order.reverse();
        let once = table.select(&order, ColumnPolicy::Strict).unwrap();
        let twice = once.select(&order, ColumnPolicy::Strict).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn select_reports_missing_columns() {
        let table = FeatureTable::from_row(&FeatureRow::default());
        let err = table
            .select(&["Attendance (%)", "Gender"], ColumnPolicy::Lenient)
            .unwrap_err();
        assert_eq!(
            err,
            PredictError::ColumnMismatch {
                missing: vec!["Gender".to_string()],
                unexpected: vec![],
            }
        );
    }

    #[test]
    fn strict_select_rejects_unused_columns() {
        let table = FeatureTable::from_row(&FeatureRow::default());
        assert!(table.select(&["Attendance (%)"], ColumnPolicy::Lenient).is_ok());

        let err = table
            .select(&["Attendance (%)"], ColumnPolicy::Strict)
            .unwrap_err();
        let expected: Vec<String> = Feature::ALL[1..]
            .iter()
            .map(|f| f.column_name().to_string())
            .collect();
        assert_eq!(
            err,
            PredictError::ColumnMismatch {
                missing: vec![],
                unexpected: expected,
            }
        );
    }
}
