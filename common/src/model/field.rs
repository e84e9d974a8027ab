//! # Field descriptors
//!
//! A `FieldDescriptor` is one typed field of a form template. The type tag and
//! every attribute that only makes sense for some types live in [`FieldKind`],
//! so a `label` field has no `required` flag to misread and an `enum` field
//! cannot exist without its options.
//!
//! Fields are created from a partial [`FieldSpec`] (the shape a builder UI
//! sends when the user drops a new field) and edited through a partial
//! [`FieldUpdate`].

use serde::{Deserialize, Serialize};

use crate::error::{FieldSpecError, OptionsError};

/// The closed set of field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Label,
    Text,
    Number,
    Boolean,
    Enum,
}

/// Heading level used to display a `label` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    H1,
    #[default]
    H2,
    H3,
}

/// Ordered, non-empty list of distinct, non-blank choices for an `enum` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct EnumOptions(Vec<String>);

impl EnumOptions {
    pub fn new<I, S>(options: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(OptionsError::Empty);
        }
        for (index, option) in options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(OptionsError::Blank { index });
            }
            if options[..index].contains(option) {
                return Err(OptionsError::Duplicate(option.clone()));
            }
        }
        Ok(Self(options))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|option| option == value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl TryFrom<Vec<String>> for EnumOptions {
    type Error = OptionsError;

    fn try_from(options: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}

impl From<EnumOptions> for Vec<String> {
    fn from(options: EnumOptions) -> Self {
        options.0
    }
}

/// Type tag plus the attributes that belong to that type.
///
/// Serialized internally tagged, so a descriptor reads as
/// `{ "id": ..., "label": ..., "type": "enum", "required": true, "options": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Label {
        #[serde(rename = "labelStyle", default)]
        label_style: LabelStyle,
    },
    Text {
        required: bool,
    },
    Number {
        required: bool,
    },
    Boolean {
        required: bool,
    },
    Enum {
        required: bool,
        options: EnumOptions,
    },
}

/// One typed form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable id, unique within the owning section.
    pub id: String,
    /// Caption for input fields; the displayed content for `label` fields.
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn field_type(&self) -> FieldType {
        match self.kind {
            FieldKind::Label { .. } => FieldType::Label,
            FieldKind::Text { .. } => FieldType::Text,
            FieldKind::Number { .. } => FieldType::Number,
            FieldKind::Boolean { .. } => FieldType::Boolean,
            FieldKind::Enum { .. } => FieldType::Enum,
        }
    }

    /// Whether a value must be entered. Label fields never require one.
    pub fn is_required(&self) -> bool {
        match &self.kind {
            FieldKind::Label { .. } => false,
            FieldKind::Text { required }
            | FieldKind::Number { required }
            | FieldKind::Boolean { required }
            | FieldKind::Enum { required, .. } => *required,
        }
    }

    pub fn label_style(&self) -> Option<LabelStyle> {
        match &self.kind {
            FieldKind::Label { label_style } => Some(*label_style),
            _ => None,
        }
    }

    pub fn options(&self) -> Option<&EnumOptions> {
        match &self.kind {
            FieldKind::Enum { options, .. } => Some(options),
            _ => None,
        }
    }

    /// Merges a partial update into this field.
    ///
    /// Attributes that do not apply to the field's type (`required` on a
    /// label, `labelStyle` on an input, `options` on anything but an enum) are
    /// ignored. The field type itself never changes.
    pub fn apply_update(&mut self, update: FieldUpdate) {
        let FieldUpdate {
            label,
            required,
            label_style,
            options,
        } = update;

        if let Some(label) = label {
            self.label = label;
        }

        match &mut self.kind {
            FieldKind::Label { label_style: style } => {
                if let Some(new_style) = label_style {
                    *style = new_style;
                }
            }
            FieldKind::Text { required: flag }
            | FieldKind::Number { required: flag }
            | FieldKind::Boolean { required: flag } => {
                if let Some(new_flag) = required {
                    *flag = new_flag;
                }
            }
            FieldKind::Enum {
                required: flag,
                options: current,
            } => {
                if let Some(new_flag) = required {
                    *flag = new_flag;
                }
                if let Some(new_options) = options {
                    *current = new_options;
                }
            }
        }
    }
}

/// Partial description of a field to be added to a section.
///
/// Missing attributes take their defaults when the spec is completed:
/// `required` becomes `true` for input types and `labelStyle` becomes `h2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_style: Option<LabelStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<EnumOptions>,
}

impl FieldSpec {
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            field_type,
            label: label.into(),
            required: None,
            label_style: None,
            options: None,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = Some(style);
        self
    }

    pub fn with_options(mut self, options: EnumOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Completes the spec into a descriptor carrying `id`.
    pub fn into_descriptor(self, id: String) -> Result<FieldDescriptor, FieldSpecError> {
        let required = self.required.unwrap_or(true);
        let kind = match self.field_type {
            FieldType::Label => FieldKind::Label {
                label_style: self.label_style.unwrap_or_default(),
            },
            FieldType::Text => FieldKind::Text { required },
            FieldType::Number => FieldKind::Number { required },
            FieldType::Boolean => FieldKind::Boolean { required },
            FieldType::Enum => FieldKind::Enum {
                required,
                options: self.options.ok_or(FieldSpecError::MissingOptions)?,
            },
        };

        Ok(FieldDescriptor {
            id,
            label: self.label,
            kind,
        })
    }
}

/// Partial update merged into an existing field by [`FieldDescriptor::apply_update`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_style: Option<LabelStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<EnumOptions>,
}
