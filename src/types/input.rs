//! Form input data structures and validation

use thiserror::Error;

/// The six workplace attributes exactly as submitted by the form.
///
/// Fields absent from the request body are empty strings, which then fail
/// validation like any other bad value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    /// "Female" or "Male"
    pub gender: String,

    /// "Product" or "Service"
    pub company_type: String,

    /// "No" or "Yes"
    pub wfh_setup: String,

    /// Mental fatigue score, 0 to 10
    pub mental_fatigue: String,

    /// Resource allocation, 1 to 10
    pub resource_allocation: String,

    /// Designation level, 1 to 5
    pub designation: String,
}

/// A label-encoded categorical feature.
///
/// `LABELS` is in encoding order: the label at index `i` encodes to `i`,
/// matching the alphabetical encoding applied at training time.
pub trait Category: Sized + Copy {
    const LABELS: &'static [&'static str];

    fn from_index(index: usize) -> Option<Self>;

    fn index(self) -> usize;

    /// Exact, case-sensitive label lookup.
    fn parse(label: &str) -> Option<Self> {
        Self::LABELS
            .iter()
            .position(|l| *l == label)
            .and_then(Self::from_index)
    }

    /// Numeric code fed to the model.
    fn code(self) -> f32 {
        self.index() as f32
    }

    fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female = 0,
    Male = 1,
}

impl Category for Gender {
    const LABELS: &'static [&'static str] = &["Female", "Male"];

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Female),
            1 => Some(Self::Male),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyType {
    Product = 0,
    Service = 1,
}

impl Category for CompanyType {
    const LABELS: &'static [&'static str] = &["Product", "Service"];

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Product),
            1 => Some(Self::Service),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Whether a work-from-home setup is available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WfhSetup {
    No = 0,
    Yes = 1,
}

impl Category for WfhSetup {
    const LABELS: &'static [&'static str] = &["No", "Yes"];

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::No),
            1 => Some(Self::Yes),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A single failed validation rule. `Display` is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Select a valid Gender.")]
    InvalidGender,

    #[error("Select a valid Company Type.")]
    InvalidCompanyType,

    #[error("Select a valid WFH option.")]
    InvalidWfhSetup,

    #[error("Mental Fatigue must be a number.")]
    MentalFatigueNotNumber,

    #[error("Mental Fatigue must be 0–10.")]
    MentalFatigueOutOfRange,

    #[error("Resource Allocation must be a number.")]
    ResourceAllocationNotNumber,

    #[error("Resource Allocation must be 1–10.")]
    ResourceAllocationOutOfRange,

    #[error("Designation must be a number.")]
    DesignationNotNumber,

    #[error("Designation must be 1–5.")]
    DesignationOutOfRange,
}

/// Every rule a submission violated, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", self.joined())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Separator used when showing all messages on one line
    pub const DELIMITER: &'static str = " | ";

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// All messages joined with `" | "`.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(Self::DELIMITER)
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Inclusive bounds and error messages for a numeric field
struct NumericRule {
    min: f64,
    max: f64,
    not_number: FieldError,
    out_of_range: FieldError,
}

const MENTAL_FATIGUE: NumericRule = NumericRule {
    min: 0.0,
    max: 10.0,
    not_number: FieldError::MentalFatigueNotNumber,
    out_of_range: FieldError::MentalFatigueOutOfRange,
};

const RESOURCE_ALLOCATION: NumericRule = NumericRule {
    min: 1.0,
    max: 10.0,
    not_number: FieldError::ResourceAllocationNotNumber,
    out_of_range: FieldError::ResourceAllocationOutOfRange,
};

const DESIGNATION: NumericRule = NumericRule {
    min: 1.0,
    max: 5.0,
    not_number: FieldError::DesignationNotNumber,
    out_of_range: FieldError::DesignationOutOfRange,
};

impl NumericRule {
    fn check(&self, value: &str) -> Result<f64, FieldError> {
        let number: f64 = value.trim().parse().map_err(|_| self.not_number)?;
        // NaN fails both comparisons and lands here too
        if number >= self.min && number <= self.max {
            Ok(number)
        } else {
            Err(self.out_of_range)
        }
    }
}

/// A submission in which all six fields passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    pub gender: Gender,
    pub company_type: CompanyType,
    pub wfh_setup: WfhSetup,
    pub mental_fatigue: f64,
    pub resource_allocation: f64,
    pub designation: f64,
}

impl RawInput {
    /// Collect the form fields from decoded body pairs.
    ///
    /// The first value of a repeated key wins and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        let mut seen = [false; 6];

        for (key, value) in pairs {
            let (slot, field) = match key.as_ref() {
                "gender" => (0, &mut raw.gender),
                "company_type" => (1, &mut raw.company_type),
                "wfh_setup" => (2, &mut raw.wfh_setup),
                "mental_fatigue" => (3, &mut raw.mental_fatigue),
                "resource_allocation" => (4, &mut raw.resource_allocation),
                "designation" => (5, &mut raw.designation),
                _ => continue,
            };
            if !seen[slot] {
                seen[slot] = true;
                *field = value.into();
            }
        }

        raw
    }

    /// Validate and cast every field.
    ///
    /// All rules are evaluated; on failure the returned errors list every
    /// violation in field order (gender, company type, WFH, mental fatigue,
    /// resource allocation, designation).
    pub fn validate(&self) -> Result<ValidatedInput, ValidationErrors> {
        let gender = Gender::parse(&self.gender).ok_or(FieldError::InvalidGender);
        let company_type =
            CompanyType::parse(&self.company_type).ok_or(FieldError::InvalidCompanyType);
        let wfh_setup = WfhSetup::parse(&self.wfh_setup).ok_or(FieldError::InvalidWfhSetup);
        let mental_fatigue = MENTAL_FATIGUE.check(&self.mental_fatigue);
        let resource_allocation = RESOURCE_ALLOCATION.check(&self.resource_allocation);
        let designation = DESIGNATION.check(&self.designation);

        match (
            gender,
            company_type,
            wfh_setup,
            mental_fatigue,
            resource_allocation,
            designation,
        ) {
            (
                Ok(gender),
                Ok(company_type),
                Ok(wfh_setup),
                Ok(mental_fatigue),
                Ok(resource_allocation),
                Ok(designation),
            ) => Ok(ValidatedInput {
                gender,
                company_type,
                wfh_setup,
                mental_fatigue,
                resource_allocation,
                designation,
            }),
            (g, c, w, m, r, d) => Err([g.err(), c.err(), w.err(), m.err(), r.err(), d.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }
}
