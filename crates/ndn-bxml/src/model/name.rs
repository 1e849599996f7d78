//! Hierarchical names.

use std::borrow::Cow;
use std::fmt;

/// A hierarchical name: an ordered sequence of opaque byte components.
///
/// Component order is the path hierarchy and must round-trip byte-for-byte;
/// components may be empty and may contain any byte value, including 0.
/// Decoded names borrow their components from the input buffer (zero-copy);
/// [`into_owned`](Name::into_owned) detaches them when the name must outlive
/// the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name<'a> {
    components: Vec<Cow<'a, [u8]>>,
}

impl<'a> Name<'a> {
    /// Creates an empty name.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Creates a name from a component sequence.
    pub fn from_components(components: Vec<Cow<'a, [u8]>>) -> Self {
        Self { components }
    }

    /// Appends a component.
    pub fn push<C: Into<Cow<'a, [u8]>>>(&mut self, component: C) {
        self.components.push(component.into());
    }

    /// Returns the component at `index`.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.components.get(index).map(|c| c.as_ref())
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the name has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterates over the components in hierarchy order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.components.iter().map(|c| c.as_ref())
    }

    /// Copies any borrowed components, detaching the name from its input
    /// buffer.
    pub fn into_owned(self) -> Name<'static> {
        Name {
            components: self
                .components
                .into_iter()
                .map(|c| Cow::Owned(c.into_owned()))
                .collect(),
        }
    }
}

/// Renders the ndn URI form: `/` followed by the escaped components, or a
/// bare `/` for the empty name.
///
/// Bytes outside the unreserved set (alphanumerics and `-._~`) are
/// percent-escaped. A component consisting entirely of periods (including
/// the empty component) gains three extra periods, so it survives the URI
/// `.`/`..` path conventions.
impl fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return f.write_str("/");
        }
        for component in self.iter() {
            f.write_str("/")?;
            write_escaped_component(f, component)?;
        }
        Ok(())
    }
}

fn write_escaped_component(f: &mut fmt::Formatter<'_>, component: &[u8]) -> fmt::Result {
    if component.iter().all(|&b| b == b'.') {
        for _ in 0..component.len() + 3 {
            f.write_str(".")?;
        }
        return Ok(());
    }
    for &byte in component {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            write!(f, "{}", byte as char)?;
        } else {
            write!(f, "%{byte:02X}")?;
        }
    }
    Ok(())
}
