use clap::{Parser as ClapParser, ValueEnum};
use std::{
    process,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use lambda::{
    Function, Record, Result, Signature, TO_STRING, Value, partial, partial_with,
    pepper, prototype, record, singleton,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Tour {
    Prototype,
    Singleton,
    Partial,
    Pepper,
    All,
}

#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Which combinator to demonstrate
    #[arg(value_enum, default_value_t = Tour::All)]
    tour: Tour,

    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn method<F>(name: &'static str, body: F) -> Value
where
    F: Fn(&lambda::Frame<'_>) -> Result<Value> + Send + Sync + 'static,
{
    Value::from(Function::nullary(name, body))
}

fn tour_prototype() -> Result<()> {
    let base = prototype(record([
        ("bar", method("bar", |_| Ok(Value::from("bar")))),
        (
            "foo",
            method("foo", |frame| {
                Ok(Value::from(format!("<b>{}</b>", frame.send("bar", &[])?)))
            }),
        ),
        (
            TO_STRING,
            method(TO_STRING, |frame| {
                Ok(Value::from(format!("object saying {}", frame.send("foo", &[])?)))
            }),
        ),
    ]));
    let parent = base.clone();
    let derived = base.extend(record([(
        "bar",
        method("bar", move |_| {
            Ok(Value::from(format!("foo{}", parent.send("bar", &[])?)))
        }),
    )]));

    println!("base.foo()    = {}", base.send("foo", &[])?);
    println!("derived.foo() = {}", derived.send("foo", &[])?);
    println!("derived       = {derived}");
    match derived.send("baz", &[]) {
        Ok(value) => println!("derived.baz() = {value}"),
        Err(err) => println!("derived.baz() failed: {err}"),
    }
    Ok(())
}

fn tour_singleton() -> Result<()> {
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = counter.clone();
    let lazy = singleton(Function::nullary("lazy", move |_| {
        let run = seen.fetch_add(1, Ordering::SeqCst);
        Ok(Value::from(format!("computed on run {run}")))
    }));

    for _ in 0..3 {
        println!("lazy() = {}", lazy.call(&[])?);
    }
    println!("target ran {} time(s)", counter.load(Ordering::SeqCst));
    Ok(())
}

fn xyzq(signature: Signature) -> Function {
    Function::native("xyzq", signature, |frame| {
        let mut out = Record::new();
        for (name, value) in ["x", "y", "z", "q"].iter().zip(frame.args()) {
            out.insert((*name).into(), value.clone());
        }
        Ok(Value::from(out))
    })
}

fn tour_partial() -> Result<()> {
    let f = xyzq(
        Signature::new()
            .required("x")
            .required("y")
            .required("z")
            .optional("q", 1),
    );
    let g = partial(f, [(0, Value::from("x")), (2, Value::from("z"))]);
    println!("partial(f, {{0: x, 2: z}})(y) = {}", g.call(&[Value::from("y")])?);

    let f = xyzq(
        Signature::new()
            .required("x")
            .required("y")
            .optional("z", "z")
            .optional("q", 1),
    );
    let g = partial_with(
        f,
        [(0, Value::from("x")), (3, Value::from("q"))],
        [(2, Value::from("z"))],
    );
    println!(
        "partial(f, {{0: x, 3: q}}, {{2: z}})(y) = {}",
        g.call(&[Value::from("y")])?
    );
    Ok(())
}

fn tour_pepper() -> Result<()> {
    let same = Function::native(
        "same",
        Signature::new().required("peppered").required("reallypeppered"),
        |frame| Ok(Value::from(frame.arg(0)? == frame.arg(1)?)),
    );
    let p = pepper(
        same,
        [("peppered", Value::Nil), ("reallypeppered", Value::Nil)],
    );
    let args = record([
        ("reallypeppered", Value::from(1)),
        ("peppered", Value::from(1)),
    ]);
    println!("pepper(same)({}) = {}", Value::from(args.clone()), p.call(&[Value::from(args)])?);
    Ok(())
}

fn run(tour: Tour) -> Result<()> {
    match tour {
        Tour::Prototype => tour_prototype(),
        Tour::Singleton => tour_singleton(),
        Tour::Partial => tour_partial(),
        Tour::Pepper => tour_pepper(),
        Tour::All => {
            tour_prototype()?;
            tour_singleton()?;
            tour_partial()?;
            tour_pepper()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .init();

    if let Err(err) = run(cli.tour) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
