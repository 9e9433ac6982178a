//! Built-in functions
//!
//! The set is fixed: names resolve to a [`Function`] at parse time, so the
//! evaluator never looks anything up by string.

pub mod math;

use crate::error::{EvalError, EvalResult};
use std::fmt;

/// Function implementation signature
///
/// Arguments are already evaluated and the arity already checked.
pub type FunctionImpl = fn(&[f64]) -> EvalResult<f64>;

/// Function definition
pub struct FunctionDef {
    pub function: Function,
    /// Function name (lowercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

/// Built-in functions, in the same order as [`FUNCTIONS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sqrt,
    Pow,
    Abs,
    Round,
    Floor,
    Ceil,
    Min,
    Max,
    Sin,
    Cos,
    Tan,
    Log,
    Exp,
}

const fn unary(
    function: Function,
    name: &'static str,
    implementation: FunctionImpl,
) -> FunctionDef {
    FunctionDef {
        function,
        name,
        min_args: 1,
        max_args: Some(1),
        implementation,
    }
}

/// Definition table, indexed by `Function as usize`
pub static FUNCTIONS: [FunctionDef; 13] = [
    unary(Function::Sqrt, "sqrt", math::fn_sqrt),
    FunctionDef {
        function: Function::Pow,
        name: "pow",
        min_args: 2,
        max_args: Some(2),
        implementation: math::fn_pow,
    },
    unary(Function::Abs, "abs", math::fn_abs),
    unary(Function::Round, "round", math::fn_round),
    unary(Function::Floor, "floor", math::fn_floor),
    unary(Function::Ceil, "ceil", math::fn_ceil),
    FunctionDef {
        function: Function::Min,
        name: "min",
        min_args: 2,
        max_args: None,
        implementation: math::fn_min,
    },
    FunctionDef {
        function: Function::Max,
        name: "max",
        min_args: 2,
        max_args: None,
        implementation: math::fn_max,
    },
    unary(Function::Sin, "sin", math::fn_sin),
    unary(Function::Cos, "cos", math::fn_cos),
    unary(Function::Tan, "tan", math::fn_tan),
    unary(Function::Log, "log", math::fn_log),
    unary(Function::Exp, "exp", math::fn_exp),
];

impl Function {
    /// Look up a function by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        FUNCTIONS
            .iter()
            .find(|def| def.name.eq_ignore_ascii_case(name))
            .map(|def| def.function)
    }

    pub fn def(self) -> &'static FunctionDef {
        &FUNCTIONS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// Check an argument count against this function's arity
    pub fn check_arity(self, actual: usize) -> EvalResult<()> {
        let def = self.def();
        let expected = match def.max_args {
            Some(max) if max == def.min_args => format!("exactly {}", max),
            Some(max) if actual > max => format!("at most {}", max),
            _ => format!("at least {}", def.min_args),
        };

        let too_few = actual < def.min_args;
        let too_many = def.max_args.map_or(false, |max| actual > max);
        if too_few || too_many {
            return Err(EvalError::syntax(format!(
                "Wrong number of arguments for {}: expected {}, got {}",
                def.name, expected, actual
            )));
        }
        Ok(())
    }

    /// Apply the function to already evaluated arguments
    pub fn call(self, args: &[f64]) -> EvalResult<f64> {
        self.check_arity(args.len())?;
        (self.def().implementation)(args)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
