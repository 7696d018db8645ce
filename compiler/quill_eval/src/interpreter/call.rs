//! Function calls.

use quill_ir::{FunctionDef, Name, Op, Value};

use super::{Flow, Interpreter};
use crate::errors::{
    missing_argument, missing_return, stack_overflow, too_many_arguments, EvalResult,
};

impl Interpreter<'_> {
    /// Call `function` with `args` evaluated in the caller's scope.
    ///
    /// A name with no definition in scope is plain CSS (`rgba(...)`,
    /// `calc(...)`) and renders as written.
    pub(super) fn call_function(
        &mut self,
        function: Name,
        written: &str,
        args: &[Op],
    ) -> EvalResult<Value> {
        let values = args
            .iter()
            .map(|arg| self.eval_op(arg))
            .collect::<EvalResult<Vec<_>>>()?;

        let Some(binding) = self.env.lookup_function(function) else {
            tracing::trace!(function = written, "no definition, rendering as CSS");
            return Ok(plain_css_call(written, &values));
        };
        let def = binding.def;
        if values.len() > def.params.len() {
            return Err(too_many_arguments(
                &def.written,
                def.params.len(),
                values.len(),
            ));
        }
        if self.call_depth >= self.max_call_depth {
            return Err(stack_overflow(self.max_call_depth));
        }

        tracing::debug!(
            function = %def.written,
            args = values.len(),
            depth = self.call_depth + 1,
            "call"
        );
        let mut scoped = self.scoped_call(binding.scope);
        scoped.bind_params(&def, values)?;
        match scoped.exec_block(&def.body)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Err(missing_return(&def.written)),
        }
    }

    /// Assign arguments to parameter slots in the current (call) scope.
    ///
    /// Defaults are evaluated in the call scope, after the parameters
    /// before them are bound.
    fn bind_params(&mut self, def: &FunctionDef, values: Vec<Value>) -> EvalResult<()> {
        let mut values = values.into_iter();
        for param in &def.params {
            let value = match (values.next(), &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval_op(default)?,
                (None, None) => return Err(missing_argument(&def.written, &param.written)),
            };
            self.env.assign_slot(param.slot, param.name, value);
        }
        Ok(())
    }
}

/// `name(arg, arg)` as an unquoted string.
fn plain_css_call(name: &str, args: &[Value]) -> Value {
    let args: Vec<String> = args.iter().map(Value::to_css_string).collect();
    Value::ident(format!("{name}({})", args.join(", ")))
}
