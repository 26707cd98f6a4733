use std::{collections::BTreeMap, fmt, iter};

use crate::{Callable, Function, Param, Proto, Result, Signature, Value};

/// Positional index → fixed value.
pub type Slots = BTreeMap<usize, Value>;

/// A callable with some positional slots fixed in advance.
///
/// Supplied arguments fill the remaining slots in ascending order. Slots
/// still empty after that take the target's defaults.
pub struct Partial {
    name: String,
    target: Function,
    bound: Slots,
    signature: Signature,
}

/// Fix the positions in `bound` of `target`.
pub fn partial(
    target: Function,
    bound: impl IntoIterator<Item = (usize, Value)>,
) -> Function {
    Function::new(Partial::new(target, bound, iter::empty()))
}

/// Like [`partial`], merging two slot maps; `primary` wins on collisions.
pub fn partial_with(
    target: Function,
    primary: impl IntoIterator<Item = (usize, Value)>,
    secondary: impl IntoIterator<Item = (usize, Value)>,
) -> Function {
    Function::new(Partial::new(target, primary, secondary))
}

impl Partial {
    /// A partial of a partial is flattened: slot indices always refer to the
    /// innermost target, and the earlier binding wins on collisions.
    pub fn new(
        target: Function,
        primary: impl IntoIterator<Item = (usize, Value)>,
        secondary: impl IntoIterator<Item = (usize, Value)>,
    ) -> Self {
        let mut bound: Slots = secondary.into_iter().collect();
        bound.extend(primary);

        let target = match target.callable().as_partial() {
            Some(inner) => {
                log::debug!(
                    "partial `{}`: flattening onto {} bound slots",
                    inner.target.name(),
                    inner.bound.len()
                );
                bound.extend(inner.bound.iter().map(|(i, v)| (*i, v.clone())));
                inner.target.clone()
            }
            None => target,
        };

        let signature = free_signature(target.signature(), &bound);
        Self {
            name: format!("partial {}", target.name()),
            target,
            bound,
            signature,
        }
    }

    #[inline]
    pub fn target(&self) -> &Function {
        &self.target
    }

    #[inline]
    pub fn bound(&self) -> &Slots {
        &self.bound
    }

    /// Number of positions the target receives before surplus arguments.
    ///
    /// Saturates for a slot bound at `usize::MAX`; the gap below it always
    /// fails first.
    pub fn width(&self) -> usize {
        let highest_bound = self
            .bound
            .keys()
            .next_back()
            .map_or(0, |i| i.saturating_add(1));
        self.target.signature().len().max(highest_bound)
    }

    /// Positional arguments for the target after merging bound slots,
    /// `args` and defaults. Stops at the first gap nothing can fill.
    pub fn arguments(&self, args: &[Value]) -> Result<Vec<Value>> {
        let width = self.width();
        let target_signature = self.target.signature();
        let mut supplied = args.iter();
        let mut resolved = Vec::new();

        for position in 0..width {
            if let Some(value) = self.bound.get(&position) {
                resolved.push(value.clone());
            } else if let Some(value) = supplied.next() {
                resolved.push(value.clone());
            } else {
                resolved.push(target_signature.default_at(self.target.name(), position)?);
            }
        }
        resolved.extend(supplied.cloned());
        Ok(resolved)
    }
}

/// The target's parameters that remain free, in order.
fn free_signature(target: &Signature, bound: &Slots) -> Signature {
    if !target.is_declared() {
        return Signature::opaque();
    }
    Signature::from_params(
        target
            .params()
            .iter()
            .enumerate()
            .filter(|(i, _)| !bound.contains_key(i))
            .map(|(_, p)| Param::clone(p)),
    )
}

impl Callable for Partial {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, this: Option<&Proto>, args: &[Value]) -> Result<Value> {
        let resolved = self.arguments(args)?;
        self.target.call_with(this, &resolved)
    }

    fn as_partial(&self) -> Option<&Partial> {
        Some(self)
    }
}

impl fmt::Debug for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partial")
            .field("target", &self.target)
            .field("bound", &self.bound)
            .finish()
    }
}
