//! End-to-end scenarios: build a template, process it, hand the result to
//! an evaluator and run it.
//!
//! The evaluator here is a deliberately tiny interpreter that understands
//! just enough statement forms to run the generated bodies:
//!
//! ```text
//! model.<field> = <lookup>.<key>(<operand>, ...);
//! return model;
//! ```
//!
//! Operands are `model.<field>` or number literals.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test code uses unwrap for concise assertions"
)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use funexp::{
    fun, make_processor, template, Bindings, CompileError, Evaluator, ProcessorConfig, Value,
};
use pretty_assertions::assert_eq;

type Model = HashMap<String, Value>;

#[derive(Debug, thiserror::Error)]
#[error("cannot compile `{statement}`: {reason}")]
struct ScriptError {
    statement: String,
    reason: &'static str,
}

#[derive(Debug)]
enum Operand {
    Field(String),
    Number(f64),
}

#[derive(Debug)]
struct Assign {
    field: String,
    key: String,
    args: Vec<Operand>,
}

/// Compiled body: assignments in order, then `return model`.
#[derive(Debug)]
struct Script {
    lookup_var: String,
    model_var: String,
    assigns: Vec<Assign>,
}

impl Script {
    fn call(&self, ctx: &Bindings, mut model: Model) -> Model {
        for assign in &self.assigns {
            let args: Vec<Value> = assign
                .args
                .iter()
                .map(|op| match op {
                    Operand::Field(name) => model.get(name).cloned().unwrap_or(Value::Null),
                    Operand::Number(n) => Value::Number(*n),
                })
                .collect();
            let callee = ctx
                .get(&assign.key)
                .and_then(Value::as_handle)
                .and_then(|h| h.as_function())
                .expect("bound callable");
            model.insert(assign.field.clone(), callee.call(&args));
        }
        model
    }
}

struct ScriptEvaluator;

impl ScriptEvaluator {
    fn operand(script: &Script, text: &str, statement: &str) -> Result<Operand, ScriptError> {
        let text = text.trim();
        if let Some(field) = text.strip_prefix(&format!("{}.", script.model_var)) {
            return Ok(Operand::Field(field.to_string()));
        }
        text.parse().map(Operand::Number).map_err(|_| ScriptError {
            statement: statement.to_string(),
            reason: "unknown operand",
        })
    }
}

impl Evaluator for ScriptEvaluator {
    type Output = Script;
    type Error = ScriptError;

    fn evaluate(&self, params: &[&str], body: &str, _: &Bindings) -> Result<Script, ScriptError> {
        let mut script = Script {
            lookup_var: params[0].to_string(),
            model_var: params[1].to_string(),
            assigns: Vec::new(),
        };
        let fail = |statement: &str, reason| ScriptError {
            statement: statement.to_string(),
            reason,
        };

        for statement in body.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            if statement == format!("return {}", script.model_var) {
                continue;
            }
            let (target, call) = statement.split_once('=').ok_or_else(|| fail(statement, "expected assignment"))?;
            let field = target
                .trim()
                .strip_prefix(&format!("{}.", script.model_var))
                .ok_or_else(|| fail(statement, "expected model field"))?;
            let call = call
                .trim()
                .strip_prefix(&format!("{}.", script.lookup_var))
                .ok_or_else(|| fail(statement, "expected context call"))?;
            let (key, rest) = call.split_once('(').ok_or_else(|| fail(statement, "expected call"))?;
            let inner = rest.strip_suffix(')').ok_or_else(|| fail(statement, "unclosed call"))?;
            let args = inner
                .split(',')
                .filter(|a| !a.trim().is_empty())
                .map(|a| Self::operand(&script, a, statement))
                .collect::<Result<Vec<_>, _>>()?;
            script.assigns.push(Assign {
                field: field.to_string(),
                key: key.to_string(),
                args,
            });
        }
        Ok(script)
    }
}

#[test]
fn test_usable_for_real_case() {
    let to_date_calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&to_date_calls);
    let to_date = Value::function(move |args| {
        seen.fetch_add(1, Ordering::Relaxed);
        match args {
            [Value::Str(s)] => Value::string(format!("Date({s})")),
            _ => Value::Null,
        }
    });
    let discount = 0.75;
    let calc_total = Value::function(|args| match args {
        [Value::Number(price), Value::Number(discount)] => Value::Number(price * discount),
        _ => Value::Null,
    });

    let my_expr = make_processor(
        ProcessorConfig::default()
            .with_lookup_var("methods")
            .with_key_prefix("$m_"),
    );
    let exp = my_expr.process(&template!(
        "
model.createdOn = ${}(model.createdOn);
model.total = ${}(model.price, ${});
return model;",
        to_date.clone(),
        calc_total.clone(),
        discount,
    ));

    assert_eq!(
        exp.source,
        "
model.createdOn = methods.$m_0(model.createdOn);
model.total = methods.$m_1(model.price, 0.75);
return model;"
    );

    let patcher = my_expr.compile(&exp, &["model"], &ScriptEvaluator).unwrap();
    let created_on = "2023-05-26T14:04:08.023Z";
    let model: Model = [
        ("createdOn".to_string(), Value::from(created_on)),
        ("price".to_string(), Value::from(100)),
    ]
    .into_iter()
    .collect();

    let result = patcher.call(&exp.bindings, model);
    assert_eq!(to_date_calls.load(Ordering::Relaxed), 1);
    assert_eq!(result["createdOn"], Value::string(format!("Date({created_on})")));
    assert_eq!(result["total"], Value::from(75));
}

#[test]
fn test_each_generated_statements_run() {
    let double = Value::function(|args| match args {
        [Value::Number(n)] => Value::Number(n * 2.0),
        _ => Value::Null,
    });
    let exp = fun()
        .each(["a", "b"])
        .process(&template!("model.${} = ${}(model.${});", "%s", double.clone(), "%s"));
    assert_eq!(exp.source, "model.a = ctx.$e_1(model.a);model.b = ctx.$e_1(model.b);");
    assert_eq!(exp.bindings.len(), 1);

    let script = fun().compile(&exp, &["model"], &ScriptEvaluator).unwrap();
    let model: Model = [("a".to_string(), Value::from(1)), ("b".to_string(), Value::from(4))]
        .into_iter()
        .collect();
    let result = script.call(&exp.bindings, model);
    assert_eq!(result["a"], Value::from(2));
    assert_eq!(result["b"], Value::from(8));
}

#[test]
fn test_compile_reports_evaluator_error() {
    let exp = fun().process(&template!("model.x = ${};", 1));
    let err = fun().compile(&exp, &["model"], &ScriptEvaluator).unwrap_err();
    assert!(matches!(err, CompileError::Evaluator(_)));
    assert_eq!(
        err.to_string(),
        "evaluator rejected generated source: cannot compile `model.x = 1`: expected context call"
    );
}

#[test]
fn test_compile_rejects_shadowed_lookup_var() {
    let exp = fun().process(&template!("return model;"));
    let err = fun().compile(&exp, &["ctx"], &ScriptEvaluator).unwrap_err();
    assert!(matches!(err, CompileError::ShadowedLookupVar(ref name) if name == "ctx"));
}

#[test]
fn test_default_instance_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|n| {
            std::thread::spawn(move || {
                let f = Value::function(|_| Value::Null);
                let exp = fun().process(&template!("${}(${})", f.clone(), n));
                (exp, f)
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let (exp, f) = handle.join().unwrap();
        assert_eq!(exp.source, format!("ctx.$e_0({n})"));
        assert_eq!(exp.bindings.get("$e_0"), Some(&f));
        assert_eq!(exp.bindings.len(), 1);
    }
}

#[test]
fn test_tracing_init_is_idempotent() {
    funexp::init_tracing();
    funexp::init_tracing();
    let exp = fun().process(&template!("${}", Value::object(())));
    assert_eq!(exp.source, "ctx.$e_0");
}
