//! Control frames: the `key=value` metadata of a graphics command.
//!
//! Keys are serialized in one fixed order, independent of the order they
//! were set in:
//!
//! ```text
//! a, f, i, r, s, v, c, C, q, X, Y, m
//! ```
//!
//! The order is the declaration order of [`ControlKey`].

use std::collections::BTreeMap;
use std::fmt;

/// What the terminal should do with the image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Transmit and display a new image (`a=T`).
    Transmit,
    /// Replace the data of an existing image (`a=f`).
    Frame,
}

impl Action {
    /// Wire character.
    pub const fn as_char(self) -> char {
        match self {
            Self::Transmit => 'T',
            Self::Frame => 'f',
        }
    }
}

/// Recognized control keys, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlKey {
    /// `a`: action.
    Action,
    /// `f`: pixel format (24 = RGB).
    Format,
    /// `i`: image identifier.
    ImageId,
    /// `r`: frame number to edit (1 = the root frame).
    FrameNumber,
    /// `s`: bitmap width in pixels.
    Width,
    /// `v`: bitmap height in pixels.
    Height,
    /// `c`: display width in terminal columns.
    Columns,
    /// `C`: do not move the cursor after drawing.
    NoCursorMove,
    /// `q`: suppress terminal responses.
    Quiet,
    /// `X`: horizontal pixel offset inside the first cell.
    OffsetX,
    /// `Y`: vertical pixel offset inside the first cell.
    OffsetY,
    /// `m`: more chunks follow.
    More,
}

impl ControlKey {
    /// Wire character.
    pub const fn as_char(self) -> char {
        match self {
            Self::Action => 'a',
            Self::Format => 'f',
            Self::ImageId => 'i',
            Self::FrameNumber => 'r',
            Self::Width => 's',
            Self::Height => 'v',
            Self::Columns => 'c',
            Self::NoCursorMove => 'C',
            Self::Quiet => 'q',
            Self::OffsetX => 'X',
            Self::OffsetY => 'Y',
            Self::More => 'm',
        }
    }
}

/// A control value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlValue {
    /// Action letter.
    Action(Action),
    /// Non-negative integer.
    Int(u32),
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action) => write!(f, "{}", action.as_char()),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<Action> for ControlValue {
    fn from(action: Action) -> Self {
        Self::Action(action)
    }
}

impl From<u32> for ControlValue {
    fn from(n: u32) -> Self {
        Self::Int(n)
    }
}

impl From<u16> for ControlValue {
    fn from(n: u16) -> Self {
        Self::Int(u32::from(n))
    }
}

impl From<bool> for ControlValue {
    fn from(flag: bool) -> Self {
        Self::Int(u32::from(flag))
    }
}

/// Ordered set of control fields for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlFrame {
    fields: BTreeMap<ControlKey, ControlValue>,
}

impl ControlFrame {
    /// Empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame carrying only the continuation flag.
    pub fn continuation(more: bool) -> Self {
        Self::new().with(ControlKey::More, more)
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, key: ControlKey, value: impl Into<ControlValue>) -> &mut Self {
        self.fields.insert(key, value.into());
        self
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: ControlKey, value: impl Into<ControlValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field only when `value` is `Some`.
    #[must_use]
    pub fn with_opt<V: Into<ControlValue>>(self, key: ControlKey, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Remove a field.
    pub fn remove(&mut self, key: ControlKey) -> Option<ControlValue> {
        self.fields.remove(&key)
    }

    /// Value of a field.
    pub fn get(&self, key: ControlKey) -> Option<ControlValue> {
        self.fields.get(&key).copied()
    }

    /// Check whether a field is set.
    pub fn contains(&self, key: ControlKey) -> bool {
        self.fields.contains_key(&key)
    }

    /// Action field, if set.
    pub fn action(&self) -> Option<Action> {
        match self.get(ControlKey::Action) {
            Some(ControlValue::Action(action)) => Some(action),
            _ => None,
        }
    }

    /// Image identifier field, if set.
    pub fn image_id(&self) -> Option<u32> {
        self.int(ControlKey::ImageId)
    }

    /// Continuation flag; `None` when unset.
    pub fn more(&self) -> Option<bool> {
        self.int(ControlKey::More).map(|m| m != 0)
    }

    fn int(&self, key: ControlKey) -> Option<u32> {
        match self.get(key) {
            Some(ControlValue::Int(n)) => Some(n),
            _ => None,
        }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (ControlKey, ControlValue)> + '_ {
        self.fields.iter().map(|(k, v)| (*k, *v))
    }
}

impl fmt::Display for ControlFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={value}", key.as_char())?;
        }
        Ok(())
    }
}
