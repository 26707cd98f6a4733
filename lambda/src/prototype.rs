use std::{fmt, sync::Arc};

use crate::{
    Chain, Error, LookupResult, Record, Result, Value,
    lookup::{lookup, lookup_method},
};

/// Reserved method name consulted for string conversion.
pub const TO_STRING: &str = "toString";

/// Text used when no `toString` method resolves.
pub const DEFAULT_REPRESENTATION: &str = "[object Prototype]";

/// An immutable property bag delegating missing names to its parent.
///
/// Methods stored as properties are invoked with `this` bound to the
/// receiver the send started from, so a parent's method sees overrides
/// made further down the chain.
#[derive(Clone)]
pub struct Proto(Arc<ProtoInner>);

struct ProtoInner {
    properties: Record,
    parent: Option<Proto>,
}

/// Create a root object owning `properties`.
pub fn prototype(properties: Record) -> Proto {
    Proto::new(properties)
}

impl Proto {
    pub fn new(properties: Record) -> Self {
        Self(Arc::new(ProtoInner {
            properties,
            parent: None,
        }))
    }

    /// Derive a child owning `overrides` and delegating everything else to
    /// `self`. `self` is left untouched.
    pub fn extend(&self, overrides: Record) -> Self {
        Self(Arc::new(ProtoInner {
            properties: overrides,
            parent: Some(self.clone()),
        }))
    }

    #[inline]
    pub fn parent(&self) -> Option<&Proto> {
        self.0.parent.as_ref()
    }

    #[inline]
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    #[inline]
    pub fn own_properties(&self) -> &Record {
        &self.0.properties
    }

    #[inline]
    pub fn own_property(&self, name: &str) -> Option<&Value> {
        self.0.properties.get(name)
    }

    pub fn own_property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.properties.keys().map(|name| &**name)
    }

    #[inline]
    pub fn has_own_property(&self, name: &str) -> bool {
        self.0.properties.contains_key(name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.chain().any(|node| node.has_own_property(name))
    }

    /// True if `ancestor` is a strict ancestor of `self`.
    pub fn has_prototype(&self, ancestor: &Proto) -> bool {
        self.chain().skip(1).any(|node| Proto::ptr_eq(node, ancestor))
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> LookupResult {
        lookup(self, name)
    }

    /// Read `name`, delegating up the chain. Callables come back unbound.
    pub fn get(&self, name: &str) -> Result<Value> {
        lookup(self, name)
            .value()
            .ok_or_else(|| Error::PropertyNotFound {
                name: name.into(),
                receiver: self.clone(),
            })
    }

    /// Invoke the nearest callable named `name` with `this` bound to
    /// `self`.
    pub fn send(&self, name: &str, args: &[Value]) -> Result<Value> {
        match lookup_method(self, name) {
            LookupResult::Found {
                value: Value::Function(method),
                depth,
                ..
            } => {
                log::trace!("send `{name}` (holder depth {depth})");
                method.call_bound(self, args)
            }
            _ => Err(Error::MethodNotFound {
                name: name.into(),
                receiver: self.clone(),
            }),
        }
    }

    /// Text produced by the `toString` method, or the default
    /// representation when none resolves.
    pub fn to_text(&self) -> Result<String> {
        match lookup_method(self, TO_STRING) {
            LookupResult::Found {
                value: Value::Function(method),
                ..
            } => Ok(match method.call_bound(self, &[])? {
                Value::Str(text) => text.to_string(),
                other => other.to_string(),
            }),
            _ => Ok(DEFAULT_REPRESENTATION.to_string()),
        }
    }

    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Display for Proto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Ok(text) => f.write_str(&text),
            Err(err) => {
                log::warn!("`{TO_STRING}` failed: {err}");
                f.write_str(DEFAULT_REPRESENTATION)
            }
        }
    }
}

impl fmt::Debug for Proto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.own_property_names().collect();
        f.debug_struct("Proto")
            .field("own", &names)
            .field("depth", &(self.chain().count() - 1))
            .finish()
    }
}
