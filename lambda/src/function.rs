use std::{fmt, sync::Arc};

use crate::{Error, Name, Partial, Proto, Result, Signature, Value};

/// Anything that can be invoked with an optional receiver and positional
/// arguments.
///
/// `this` is the original receiver of a method send, never the chain node
/// that held the method. Wrappers pass it through untouched.
pub trait Callable: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn signature(&self) -> &Signature;

    fn call(&self, this: Option<&Proto>, args: &[Value]) -> Result<Value>;

    /// Used by partial application to flatten nested partials.
    fn as_partial(&self) -> Option<&Partial> {
        None
    }
}

/// Shared handle to a [`Callable`].
#[derive(Clone)]
pub struct Function(Arc<dyn Callable>);

pub type NativeBody = dyn Fn(&Frame<'_>) -> Result<Value> + Send + Sync;

/// A Rust closure with an explicitly declared signature.
pub struct Native {
    name: Name,
    signature: Signature,
    body: Box<NativeBody>,
}

/// Call context handed to a native body.
pub struct Frame<'a> {
    function: &'a str,
    this: Option<&'a Proto>,
    args: Vec<Value>,
}

impl Function {
    pub fn new(callable: impl Callable + 'static) -> Self {
        Self(Arc::new(callable))
    }

    pub fn native<F>(
        name: impl Into<Name>,
        signature: Signature,
        body: F,
    ) -> Self
    where
        F: Fn(&Frame<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(Native {
            name: name.into(),
            signature,
            body: Box::new(body),
        })
    }

    /// Native callable declaring no parameters, the usual shape for methods.
    pub fn nullary<F>(name: impl Into<Name>, body: F) -> Self
    where
        F: Fn(&Frame<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        Self::native(name, Signature::new(), body)
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    #[inline]
    pub fn signature(&self) -> &Signature {
        self.0.signature()
    }

    #[inline]
    pub fn callable(&self) -> &dyn Callable {
        &*self.0
    }

    /// Call without a receiver.
    #[inline]
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        self.0.call(None, args)
    }

    /// Call with `this` bound to `receiver`.
    #[inline]
    pub fn call_bound(&self, receiver: &Proto, args: &[Value]) -> Result<Value> {
        self.0.call(Some(receiver), args)
    }

    #[inline]
    pub fn call_with(&self, this: Option<&Proto>, args: &[Value]) -> Result<Value> {
        self.0.call(this, args)
    }

    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl Callable for Native {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, this: Option<&Proto>, args: &[Value]) -> Result<Value> {
        let args = self.signature.bind(&self.name, args)?;
        let frame = Frame {
            function: &self.name,
            this,
            args,
        };
        (self.body)(&frame)
    }
}

impl fmt::Debug for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

impl<'a> Frame<'a> {
    /// The original receiver, or `UnboundReceiver` outside a method send.
    pub fn this(&self) -> Result<&'a Proto> {
        self.this.ok_or_else(|| Error::UnboundReceiver {
            function: self.function.into(),
        })
    }

    #[inline]
    pub fn receiver(&self) -> Option<&'a Proto> {
        self.this
    }

    #[inline]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Argument at `position`, already resolved against the signature.
    pub fn arg(&self, position: usize) -> Result<&Value> {
        self.args.get(position).ok_or_else(|| Error::MissingArgument {
            function: self.function.into(),
            parameter: format!("#{position}").into(),
            position,
        })
    }

    /// `this.send(name, args)`
    pub fn send(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.this()?.send(name, args)
    }

    /// `this.get(name)`
    pub fn get(&self, name: &str) -> Result<Value> {
        self.this()?.get(name)
    }
}
