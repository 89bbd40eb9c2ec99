//! Value objects used by recipe drafts and queries.

use std::fmt;

use super::RecipeValidationError;

/// Non-blank recipe title, stored as supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTitle(String);

impl RecipeTitle {
    pub fn new(title: impl Into<String>) -> Result<Self, RecipeValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(RecipeValidationError::BlankTitle);
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for RecipeTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecipeTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Amount of an ingredient on a recipe line. Always finite and positive.
///
/// # Examples
/// ```
/// use recipe_backend::domain::Quantity;
///
/// assert!(Quantity::new(0.5).is_some());
/// assert!(Quantity::new(0.0).is_none());
/// assert!(Quantity::new(f64::NAN).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Quantity(f64);

impl Quantity {
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Cooking time in whole minutes; zero when the caller omits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct CookTimeMinutes(i32);

impl CookTimeMinutes {
    pub fn new(minutes: i32) -> Option<Self> {
        (minutes >= 0).then_some(Self(minutes))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

/// Step number exactly as supplied. Gaps and arbitrary ordering are allowed;
/// uniqueness within one recipe is checked by [`super::RecipeDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepNumber(i32);

impl StepNumber {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for StepNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Substring searched for in recipe titles and descriptions.
///
/// Matching ignores case. The term itself is kept verbatim, including any
/// surrounding whitespace.
///
/// # Examples
/// ```
/// use recipe_backend::domain::SearchTerm;
///
/// let term = SearchTerm::new("pasta");
/// assert!(term.matches("Pasta Primavera"));
/// assert!(!term.matches("Risotto"));
/// assert!(SearchTerm::new("").matches("Risotto"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    /// An empty term matches every recipe.
    pub fn new(term: impl Into<String>) -> Self {
        let raw = term.into();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    /// Whether `text` contains the term, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }

    /// SQL `LIKE` pattern with wildcard characters in the term escaped.
    ///
    /// The escape character is the backslash, which is PostgreSQL's default.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.raw.len() + 2);
        pattern.push('%');
        for ch in self.raw.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        self.raw.as_str()
    }
}
