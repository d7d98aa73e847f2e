//! Text inputs for the modal forms.
//!
//! A field either carries validation rules, each reported separately, or is
//! simply required. Rules stay [`RuleState::Indeterminate`] until the user
//! types something.

pub const REQUIRED_HELPER: &str = "This field is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleState {
    Indeterminate,
    Success,
    Error,
}

#[derive(Clone, Copy)]
pub struct ValidationRule {
    pub id: &'static str,
    pub message: &'static str,
    pub validate: fn(&str) -> bool,
}

impl std::fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationRule")
            .field("id", &self.id)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

pub fn rule_states(value: &str, rules: &[ValidationRule]) -> Vec<(&'static str, RuleState)> {
    rules
        .iter()
        .map(|rule| {
            let state = if value.is_empty() {
                RuleState::Indeterminate
            } else if (rule.validate)(value) {
                RuleState::Success
            } else {
                RuleState::Error
            };
            (rule.id, state)
        })
        .collect()
}

pub fn is_invalid(value: &str, rules: &[ValidationRule]) -> bool {
    rule_states(value, rules)
        .iter()
        .any(|(_, state)| *state == RuleState::Error)
}

/// Ids of the rules not yet satisfied, prefixed with the field id.
pub fn non_success_ids(field_id: &str, value: &str, rules: &[ValidationRule]) -> Vec<String> {
    rule_states(value, rules)
        .into_iter()
        .filter(|(_, state)| *state != RuleState::Success)
        .map(|(id, _)| format!("{}-{}", field_id, id))
        .collect()
}

fn has_no_whitespace(value: &str) -> bool {
    !value.chars().any(char::is_whitespace)
}

fn has_only_name_characters(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

pub const HOST_GROUP_NAME_RULES: &[ValidationRule] = &[
    ValidationRule {
        id: "no-whitespace",
        message: "Must not contain spaces",
        validate: has_no_whitespace,
    },
    ValidationRule {
        id: "allowed-characters",
        message: "Only letters, digits, '.', '-' and '_'",
        validate: has_only_name_characters,
    },
];

#[derive(Debug, Clone)]
pub struct TextField {
    pub id: &'static str,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    pub helper: Option<&'static str>,
    pub rules: &'static [ValidationRule],
}

impl TextField {
    pub fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            value: String::new(),
            required: false,
            helper: None,
            rules: &[],
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_helper(mut self, helper: &'static str) -> Self {
        self.helper = Some(helper);
        self
    }

    pub fn with_rules(mut self, rules: &'static [ValidationRule]) -> Self {
        self.rules = rules;
        self
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// Helper line shown under a required field while it is empty.
    pub fn required_helper(&self) -> Option<&'static str> {
        if self.required && self.value.is_empty() {
            Some(self.helper.unwrap_or(REQUIRED_HELPER))
        } else {
            None
        }
    }

    pub fn rule_states(&self) -> Vec<(&'static str, RuleState)> {
        rule_states(&self.value, self.rules)
    }

    pub fn is_invalid(&self) -> bool {
        is_invalid(&self.value, self.rules)
    }

    pub fn non_success_ids(&self) -> Vec<String> {
        non_success_ids(self.id, &self.value, self.rules)
    }

    /// Satisfies both the required flag and every rule.
    pub fn is_acceptable(&self) -> bool {
        if self.required && self.value.trim().is_empty() {
            return false;
        }
        self.rule_states()
            .iter()
            .all(|(_, state)| *state != RuleState::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Name,
    Description,
}

#[derive(Debug, Clone)]
pub struct AddHostGroupForm {
    pub name: TextField,
    pub description: TextField,
    pub focused: AddField,
}

impl Default for AddHostGroupForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddHostGroupForm {
    pub fn new() -> Self {
        Self {
            name: TextField::new("modal-form-host-group-name", "Host group name")
                .required()
                .with_rules(HOST_GROUP_NAME_RULES),
            description: TextField::new("modal-form-description", "Description"),
            focused: AddField::Name,
        }
    }

    pub fn focused_field_mut(&mut self) -> &mut TextField {
        match self.focused {
            AddField::Name => &mut self.name,
            AddField::Description => &mut self.description,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = match self.focused {
            AddField::Name => AddField::Description,
            AddField::Description => AddField::Name,
        };
    }

    pub fn can_submit(&self) -> bool {
        !self.name.value.is_empty() && self.name.is_acceptable()
    }

    pub fn description_value(&self) -> Option<&str> {
        let trimmed = self.description.value.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
