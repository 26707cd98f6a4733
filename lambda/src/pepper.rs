use std::fmt;

use crate::{
    Callable, Error, Function, Name, Param, Proto, Record, Result, Signature,
    Value,
};

/// Parameter name of the adapter's single record argument.
pub const ARGUMENTS: &str = "arguments";

/// Calls a positional target with a record of named arguments.
pub struct Keyword {
    name: String,
    target: Function,
    parameters: Vec<Param>,
    signature: Signature,
}

/// Adapt `target` to take a record of named arguments.
///
/// Parameter names come from the target's signature. Only when that
/// signature is opaque does the key order of `template` stand in for it;
/// template values are never used.
pub fn pepper<K>(
    target: Function,
    template: impl IntoIterator<Item = (K, Value)>,
) -> Function
where
    K: Into<Name>,
{
    Function::new(Keyword::new(target, template))
}

impl Keyword {
    pub fn new<K>(
        target: Function,
        template: impl IntoIterator<Item = (K, Value)>,
    ) -> Self
    where
        K: Into<Name>,
    {
        let parameters = if target.signature().is_declared() {
            target.signature().params().to_vec()
        } else {
            template
                .into_iter()
                .map(|(name, _)| Param::required(name))
                .collect()
        };
        log::debug!(
            "pepper `{}`: {} named parameters",
            target.name(),
            parameters.len()
        );

        Self {
            name: format!("pepper {}", target.name()),
            target,
            parameters,
            signature: Signature::new().required(ARGUMENTS),
        }
    }

    #[inline]
    pub fn target(&self) -> &Function {
        &self.target
    }

    #[inline]
    pub fn parameters(&self) -> &[Param] {
        &self.parameters
    }

    /// Positional arguments for the target, in declared order. Keys of
    /// `arguments` naming no parameter are ignored.
    pub fn arguments(&self, arguments: &Record) -> Result<Vec<Value>> {
        self.parameters
            .iter()
            .enumerate()
            .map(|(position, param)| {
                arguments
                    .get(&param.name)
                    .or(param.default.as_ref())
                    .cloned()
                    .ok_or_else(|| Error::MissingArgument {
                        function: self.target.name().into(),
                        parameter: param.name.clone(),
                        position,
                    })
            })
            .collect()
    }

    /// Call the target without a receiver.
    pub fn call_with(&self, arguments: &Record) -> Result<Value> {
        Callable::call(self, None, &[Value::Record(arguments.clone())])
    }
}

impl Callable for Keyword {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    /// No argument at all is treated as an empty record. Arguments after
    /// the record are rejected.
    fn call(&self, this: Option<&Proto>, args: &[Value]) -> Result<Value> {
        if let Some(extra) = args.get(1) {
            return Err(Error::InvalidArgument {
                function: self.name.as_str().into(),
                expected: "single record",
                found: extra.type_name(),
            });
        }
        let empty = Record::new();
        let arguments = match args.first() {
            None => &empty,
            Some(Value::Record(record)) => record,
            Some(other) => {
                return Err(Error::InvalidArgument {
                    function: self.name.as_str().into(),
                    expected: "record",
                    found: other.type_name(),
                });
            }
        };
        let resolved = self.arguments(arguments)?;
        self.target.call_with(this, &resolved)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.parameters.iter().map(|p| &*p.name).collect();
        f.debug_struct("Keyword")
            .field("target", &self.target)
            .field("parameters", &names)
            .finish()
    }
}
