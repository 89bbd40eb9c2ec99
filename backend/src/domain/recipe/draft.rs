//! Caller input and its validated draft form.

use std::collections::HashSet;

use crate::domain::{IngredientId, IngredientName, UserId};

use super::{CookTimeMinutes, Quantity, RecipeTitle, RecipeValidationError, StepNumber};

/// Raw ingredient line as submitted. Exactly one reference must be set.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLineInput {
    pub ingredient_id: Option<IngredientId>,
    pub ingredient_name: Option<String>,
    pub quantity: f64,
    pub unit: Option<String>,
}

/// Raw step as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInput {
    pub step_number: i32,
    pub instruction: String,
}

/// Raw recipe submission as received from an inbound adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSubmission {
    pub title: String,
    pub description: Option<String>,
    pub cook_time_minutes: Option<i32>,
    pub ingredients: Vec<IngredientLineInput>,
    pub steps: Vec<StepInput>,
}

/// How an ingredient line names its ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientRef {
    /// Attach to an ingredient that is expected to exist.
    ById(IngredientId),
    /// Attach by exact name, creating the ingredient on first use.
    ByName(IngredientName),
}

/// Validated ingredient line.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    pub reference: IngredientRef,
    pub quantity: Quantity,
    pub unit: Option<String>,
}

/// Validated step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDraft {
    pub step_number: StepNumber,
    pub instruction: String,
}

/// A recipe submission that passed validation and is ready to be written.
///
/// Ingredient lines and steps keep the order they were submitted in.
///
/// # Examples
/// ```
/// use recipe_backend::domain::{
///     IngredientLineInput, RecipeDraft, RecipeSubmission, StepInput, UserId,
/// };
///
/// let submission = RecipeSubmission {
///     title: "Pancakes".into(),
///     description: None,
///     cook_time_minutes: None,
///     ingredients: vec![IngredientLineInput {
///         ingredient_id: None,
///         ingredient_name: Some("Flour".into()),
///         quantity: 200.0,
///         unit: Some("g".into()),
///     }],
///     steps: vec![StepInput { step_number: 1, instruction: "Whisk".into() }],
/// };
/// let draft = RecipeDraft::try_new(UserId::random(), submission).expect("valid draft");
/// assert_eq!(draft.cook_time_minutes.value(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub owner_id: UserId,
    pub title: RecipeTitle,
    pub description: Option<String>,
    pub cook_time_minutes: CookTimeMinutes,
    pub ingredient_lines: Vec<IngredientLine>,
    pub steps: Vec<StepDraft>,
}

impl RecipeDraft {
    /// Validate a submission on behalf of `owner_id`.
    ///
    /// The first problem found is reported; title and cook time are checked
    /// first, then ingredient lines, then steps, each in input order.
    pub fn try_new(
        owner_id: UserId,
        submission: RecipeSubmission,
    ) -> Result<Self, RecipeValidationError> {
        let RecipeSubmission {
            title,
            description,
            cook_time_minutes,
            ingredients,
            steps,
        } = submission;

        let title = RecipeTitle::new(title)?;
        let cook_time_minutes = match cook_time_minutes {
            None => CookTimeMinutes::default(),
            Some(value) => CookTimeMinutes::new(value)
                .ok_or(RecipeValidationError::NegativeCookTime { value })?,
        };
        let ingredient_lines = ingredients
            .into_iter()
            .enumerate()
            .map(|(index, line)| validate_line(index, line))
            .collect::<Result<Vec<_>, _>>()?;
        let steps = validate_steps(steps)?;

        Ok(Self {
            owner_id,
            title,
            description,
            cook_time_minutes,
            ingredient_lines,
            steps,
        })
    }
}

fn validate_line(
    index: usize,
    line: IngredientLineInput,
) -> Result<IngredientLine, RecipeValidationError> {
    let IngredientLineInput {
        ingredient_id,
        ingredient_name,
        quantity,
        unit,
    } = line;

    let reference = match (ingredient_id, ingredient_name) {
        (Some(_), Some(_)) => {
            return Err(RecipeValidationError::AmbiguousIngredientReference { index });
        }
        (None, None) => return Err(RecipeValidationError::MissingIngredientReference { index }),
        (Some(id), None) => IngredientRef::ById(id),
        (None, Some(name)) => IngredientRef::ByName(
            IngredientName::new(name)
                .map_err(|_| RecipeValidationError::BlankIngredientName { index })?,
        ),
    };
    let quantity = Quantity::new(quantity).ok_or(RecipeValidationError::InvalidQuantity {
        index,
        value: quantity,
    })?;

    Ok(IngredientLine {
        reference,
        quantity,
        unit,
    })
}

fn validate_steps(steps: Vec<StepInput>) -> Result<Vec<StepDraft>, RecipeValidationError> {
    let mut seen = HashSet::with_capacity(steps.len());
    steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| {
            if step.instruction.trim().is_empty() {
                return Err(RecipeValidationError::BlankInstruction { index });
            }
            if !seen.insert(step.step_number) {
                return Err(RecipeValidationError::DuplicateStepNumber {
                    index,
                    step_number: step.step_number,
                });
            }
            Ok(StepDraft {
                step_number: StepNumber::new(step.step_number),
                instruction: step.instruction,
            })
        })
        .collect()
}
