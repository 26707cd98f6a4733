use crate::{Proto, Value};

/// The result of a property lookup.
#[derive(Debug, Clone)]
pub enum LookupResult {
    /// Name was not found anywhere in the chain.
    None,
    /// Name was found.
    Found {
        /// The object that owns the property (may differ from the receiver
        /// if it was found via a parent link).
        holder: Proto,
        /// Copy of the property value.
        value: Value,
        /// Parent links followed from the receiver, 0 for own properties.
        depth: usize,
    },
}

impl LookupResult {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found { .. })
    }

    pub fn value(self) -> Option<Value> {
        match self {
            LookupResult::None => None,
            LookupResult::Found { value, .. } => Some(value),
        }
    }
}

/// Walks a delegation chain: the receiver, its parent, its grandparent, ...
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Proto>,
}

impl<'a> Chain<'a> {
    pub fn new(receiver: &'a Proto) -> Self {
        Self {
            next: Some(receiver),
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Proto;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Look up `name` starting at `receiver`, accepting the first own property
/// for which `accept` holds.
///
/// Chains are acyclic: objects are immutable and a parent always exists
/// before its children, so no visited set is needed.
pub fn lookup_where(
    receiver: &Proto,
    name: &str,
    accept: impl Fn(&Value) -> bool,
) -> LookupResult {
    for (depth, holder) in Chain::new(receiver).enumerate() {
        let Some(value) = holder.own_property(name) else {
            continue;
        };
        if !accept(value) {
            continue;
        }
        log::trace!("lookup `{name}`: found at depth {depth}");
        return LookupResult::Found {
            holder: holder.clone(),
            value: value.clone(),
            depth,
        };
    }
    log::trace!("lookup `{name}`: not found");
    LookupResult::None
}

/// Look up any property named `name`.
#[inline]
pub fn lookup(receiver: &Proto, name: &str) -> LookupResult {
    lookup_where(receiver, name, |_| true)
}

/// Look up the nearest callable property named `name`, skipping data
/// properties of the same name.
#[inline]
pub fn lookup_method(receiver: &Proto, name: &str) -> LookupResult {
    lookup_where(receiver, name, |value| matches!(value, Value::Function(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Function, Record, prototype, record};

    #[test]
    fn lookup_own_property() {
        let obj = prototype(record([("answer", Value::from(42))]));
        match lookup(&obj, "answer") {
            LookupResult::Found {
                holder,
                value,
                depth,
            } => {
                assert!(Proto::ptr_eq(&holder, &obj));
                assert_eq!(value, Value::from(42));
                assert_eq!(depth, 0);
            }
            LookupResult::None => panic!("expected own property"),
        }
    }

    #[test]
    fn lookup_through_parents() {
        let base = prototype(record([("a", Value::from(1))]));
        let mid = base.extend(record([("b", Value::from(2))]));
        let leaf = mid.extend(record([("c", Value::from(3))]));

        match lookup(&leaf, "a") {
            LookupResult::Found { holder, depth, .. } => {
                assert!(Proto::ptr_eq(&holder, &base));
                assert_eq!(depth, 2);
            }
            LookupResult::None => panic!("expected inherited property"),
        }
        assert!(!lookup(&leaf, "missing").is_found());
    }

    #[test]
    fn method_lookup_skips_data_slots() {
        let base = prototype(record([(
            "size",
            Value::from(Function::nullary("size", |_| Ok(Value::from(1)))),
        )]));
        let leaf = base.extend(record([("size", Value::from("shadow"))]));

        match lookup_method(&leaf, "size") {
            LookupResult::Found { holder, depth, .. } => {
                assert!(Proto::ptr_eq(&holder, &base));
                assert_eq!(depth, 1);
            }
            LookupResult::None => panic!("expected method in parent"),
        }
        assert_eq!(lookup(&leaf, "size").value(), Some(Value::from("shadow")));
    }

    #[test]
    fn chain_visits_receiver_first() {
        let base = prototype(Record::new());
        let leaf = base.extend(Record::new());
        let nodes: Vec<_> = Chain::new(&leaf).collect();
        assert_eq!(nodes.len(), 2);
        assert!(Proto::ptr_eq(nodes[0], &leaf));
        assert!(Proto::ptr_eq(nodes[1], &base));
    }
}
