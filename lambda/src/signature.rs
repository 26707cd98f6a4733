use crate::{Error, Name, Result, Value};

/// A declared parameter: its name and, optionally, a default value.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Name,
    pub default: Option<Value>,
}

impl Param {
    pub fn required(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn optional(name: impl Into<Name>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Parameter list of a callable, stated explicitly at wrap time.
///
/// A declared signature knows its parameters' names, order and defaults.
/// An opaque signature describes a callable that takes any positional
/// arguments and exposes nothing about them.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    params: Vec<Param>,
    declared: bool,
}

impl Default for Signature {
    fn default() -> Self {
        Self::new()
    }
}

impl Signature {
    /// Declared signature with no parameters.
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            declared: true,
        }
    }

    pub fn opaque() -> Self {
        Self {
            params: Vec::new(),
            declared: false,
        }
    }

    pub fn from_params(params: impl IntoIterator<Item = Param>) -> Self {
        Self {
            params: params.into_iter().collect(),
            declared: true,
        }
    }

    pub fn required(mut self, name: impl Into<Name>) -> Self {
        self.params.push(Param::required(name));
        self.declared = true;
        self
    }

    pub fn optional(
        mut self,
        name: impl Into<Name>,
        default: impl Into<Value>,
    ) -> Self {
        self.params.push(Param::optional(name, default));
        self.declared = true;
        self
    }

    #[inline]
    pub fn is_declared(&self) -> bool {
        self.declared
    }

    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn param(&self, position: usize) -> Option<&Param> {
        self.params.get(position)
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| &*p.name == name)
    }

    /// Resolve the value for an unsupplied position: the parameter's
    /// default, or `MissingArgument`. Positions past the declared list are
    /// reported as `#position`.
    pub fn default_at(&self, function: &str, position: usize) -> Result<Value> {
        match self.params.get(position) {
            Some(Param {
                default: Some(value),
                ..
            }) => Ok(value.clone()),
            Some(param) => Err(Error::MissingArgument {
                function: function.into(),
                parameter: param.name.clone(),
                position,
            }),
            None => Err(Error::MissingArgument {
                function: function.into(),
                parameter: format!("#{position}").into(),
                position,
            }),
        }
    }

    /// Bind positional `args` against this signature.
    ///
    /// Unsupplied positions take their default; surplus arguments are kept
    /// after the declared ones. Opaque signatures pass `args` through.
    pub fn bind(&self, function: &str, args: &[Value]) -> Result<Vec<Value>> {
        if !self.declared {
            return Ok(args.to_vec());
        }

        let mut bound = Vec::with_capacity(self.params.len().max(args.len()));
        for position in 0..self.params.len() {
            match args.get(position) {
                Some(value) => bound.push(value.clone()),
                None => bound.push(self.default_at(function, position)?),
            }
        }
        if args.len() > self.params.len() {
            bound.extend_from_slice(&args[self.params.len()..]);
        }
        Ok(bound)
    }
}
