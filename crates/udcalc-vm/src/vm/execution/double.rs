//! Double-domain instruction execution

use crate::opcode::OpCode;
use crate::vm::ops::ValueOperations;
use std::f64::consts::{E, PI};
use udcalc_types::{ErrorKind, Value};

/// Largest n whose factorial is finite in f64
const MAX_FACTORIAL: f64 = 170.0;

/// Execute a double opcode on already-unwrapped operands
pub(super) fn execute(opcode: OpCode, args: &[f64]) -> Value {
    match opcode {
        OpCode::Add => ValueOperations::check_double(args[0] + args[1]),
        OpCode::Sub => ValueOperations::check_double(args[0] - args[1]),
        OpCode::Mul => {
            let (a, b) = (args[0], args[1]);
            ValueOperations::check_scaled(a * b, a != 0.0 && b != 0.0)
        }
        OpCode::Div => {
            let (a, b) = (args[0], args[1]);
            if b == 0.0 {
                ValueOperations::divide_by_zero()
            } else {
                ValueOperations::check_scaled(a / b, a != 0.0)
            }
        }
        OpCode::Neg => ValueOperations::check_double(-args[0]),
        OpCode::Pow => pow(args[0], args[1]),
        OpCode::Percent => ValueOperations::check_double(args[0] / 100.0),
        OpCode::Fact => factorial(args[0]),

        OpCode::Sqrt => ValueOperations::check_double(args[0].sqrt()),
        OpCode::Cbrt => ValueOperations::check_double(args[0].cbrt()),
        OpCode::Exp => ValueOperations::check_scaled(args[0].exp(), true),
        OpCode::Ln => ValueOperations::check_double(args[0].ln()),
        OpCode::Log10 => ValueOperations::check_double(args[0].log10()),
        OpCode::Log2 => ValueOperations::check_double(args[0].log2()),

        OpCode::Sin => ValueOperations::check_double(args[0].sin()),
        OpCode::Cos => ValueOperations::check_double(args[0].cos()),
        OpCode::Tan => ValueOperations::check_double(args[0].tan()),
        OpCode::ASin => ValueOperations::check_double(args[0].asin()),
        OpCode::ACos => ValueOperations::check_double(args[0].acos()),
        OpCode::ATan => ValueOperations::check_double(args[0].atan()),

        OpCode::SinD => sin_degrees(args[0]),
        OpCode::CosD => cos_degrees(args[0]),
        OpCode::TanD => tan_degrees(args[0]),
        OpCode::ASinD => asin_degrees(args[0]),
        OpCode::ACosD => acos_degrees(args[0]),
        OpCode::ATanD => atan_degrees(args[0]),

        OpCode::Sinh => ValueOperations::check_double(args[0].sinh()),
        OpCode::Cosh => ValueOperations::check_double(args[0].cosh()),
        OpCode::Tanh => ValueOperations::check_double(args[0].tanh()),
        OpCode::ASinh => ValueOperations::check_double(args[0].asinh()),
        OpCode::ACosh => ValueOperations::check_double(args[0].acosh()),
        OpCode::ATanh => ValueOperations::check_double(args[0].atanh()),

        OpCode::YRoot => root(args[0], args[1]),
        OpCode::LogY => log_base(args[0], args[1]),

        _ => unreachable!("Non-double opcode {} in double handler", opcode),
    }
}

fn pow(base: f64, exponent: f64) -> Value {
    if base == 0.0 && exponent < 0.0 {
        return ValueOperations::divide_by_zero();
    }
    ValueOperations::check_scaled(base.powf(exponent), base != 0.0)
}

/// `degree`-th root of `x`; odd integer roots of negatives stay real
fn root(x: f64, degree: f64) -> Value {
    if degree == 0.0 {
        return ValueOperations::divide_by_zero();
    }
    let result = if degree == 2.0 {
        x.sqrt()
    } else if degree == 3.0 {
        x.cbrt()
    } else if x < 0.0 && is_odd_integer(degree) {
        -(-x).powf(degree.recip())
    } else {
        x.powf(degree.recip())
    };
    ValueOperations::check_double(result)
}

fn is_odd_integer(x: f64) -> bool {
    x.fract() == 0.0 && x.rem_euclid(2.0) == 1.0
}

/// Logarithm of `x` in base `base`
fn log_base(x: f64, base: f64) -> Value {
    if base == 1.0 {
        return ValueOperations::divide_by_zero();
    }
    let result = if base == 2.0 {
        x.log2()
    } else if base == 10.0 {
        x.log10()
    } else {
        x.ln() / base.ln()
    };
    ValueOperations::check_double(result)
}

fn factorial(x: f64) -> Value {
    if x.is_nan() {
        return Value::Error(ErrorKind::Unknown);
    }
    if x.fract() == 0.0 {
        if x < 0.0 {
            return Value::Error(ErrorKind::Unknown);
        }
        if x > MAX_FACTORIAL {
            return Value::Error(ErrorKind::Overflow);
        }
        let product = (2..=x as u32).fold(1.0_f64, |acc, n| acc * n as f64);
        return Value::Double(product);
    }
    ValueOperations::check_double(gamma(x + 1.0))
}

// ===== Degree trigonometry =====
//
// Quadrant angles are answered from a table so that e.g. sind(180) is 0
// rather than 1.2e-16.

fn sin_degrees(x: f64) -> Value {
    let turn = x.rem_euclid(360.0);
    let result = if turn == 0.0 || turn == 180.0 {
        0.0
    } else if turn == 90.0 {
        1.0
    } else if turn == 270.0 {
        -1.0
    } else {
        x.to_radians().sin()
    };
    ValueOperations::check_double(result)
}

fn cos_degrees(x: f64) -> Value {
    let turn = x.rem_euclid(360.0);
    let result = if turn == 0.0 {
        1.0
    } else if turn == 180.0 {
        -1.0
    } else if turn == 90.0 || turn == 270.0 {
        0.0
    } else {
        x.to_radians().cos()
    };
    ValueOperations::check_double(result)
}

fn tan_degrees(x: f64) -> Value {
    let turn = x.rem_euclid(180.0);
    if turn == 90.0 {
        ValueOperations::divide_by_zero()
    } else if turn == 0.0 {
        Value::Double(0.0)
    } else {
        ValueOperations::check_double(x.to_radians().tan())
    }
}

fn asin_degrees(x: f64) -> Value {
    let result = if x == 1.0 {
        90.0
    } else if x == -1.0 {
        -90.0
    } else if x == 0.5 {
        30.0
    } else if x == -0.5 {
        -30.0
    } else if x == 0.0 {
        0.0
    } else {
        x.asin().to_degrees()
    };
    ValueOperations::check_double(result)
}

fn acos_degrees(x: f64) -> Value {
    let result = if x == 1.0 {
        0.0
    } else if x == -1.0 {
        180.0
    } else if x == 0.5 {
        60.0
    } else if x == -0.5 {
        120.0
    } else if x == 0.0 {
        90.0
    } else {
        x.acos().to_degrees()
    };
    ValueOperations::check_double(result)
}

fn atan_degrees(x: f64) -> Value {
    let result = if x == 1.0 {
        45.0
    } else if x == -1.0 {
        -45.0
    } else if x == 0.0 {
        0.0
    } else {
        x.atan().to_degrees()
    };
    ValueOperations::check_double(result)
}

// ===== Gamma =====

/// 2 * sqrt(e / pi)
const TWO_SQRT_E_OVER_PI: f64 = 1.860_382_734_205_265_7;
/// Lanczos parameter
const GAMMA_R: f64 = 10.900511;
/// Lanczos coefficients for `GAMMA_R`
const GAMMA_DK: [f64; 11] = [
    2.485_740_891_387_535_5e-5,
    1.051_423_785_817_219_7,
    -3.456_870_972_220_162_5,
    4.512_277_094_668_948,
    -2.982_852_253_235_766_4,
    1.056_397_115_771_267,
    -1.954_287_731_916_458_7e-1,
    1.709_705_434_044_412e-2,
    -5.719_261_174_043_057e-4,
    4.633_994_733_599_057e-6,
    -2.719_949_084_886_077_2e-9,
];

/// Gamma function by the Lanczos approximation, with the reflection formula
/// below 0.5
pub fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        let s = lanczos_sum(1.0 - x);
        PI / ((PI * x).sin()
            * s
            * TWO_SQRT_E_OVER_PI
            * ((0.5 - x + GAMMA_R) / E).powf(0.5 - x))
    } else {
        let s = lanczos_sum(x);
        s * TWO_SQRT_E_OVER_PI * ((x - 0.5 + GAMMA_R) / E).powf(x - 0.5)
    }
}

fn lanczos_sum(x: f64) -> f64 {
    GAMMA_DK
        .iter()
        .enumerate()
        .skip(1)
        .fold(GAMMA_DK[0], |s, (k, dk)| s + dk / (x + k as f64 - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gamma_integers() {
        assert_relative_eq!(gamma(1.0), 1.0, max_relative = 1e-10);
        assert_relative_eq!(gamma(5.0), 24.0, max_relative = 1e-10);
        assert_relative_eq!(gamma(0.5), PI.sqrt(), max_relative = 1e-10);
    }

    #[test]
    fn test_factorial_table() {
        assert_eq!(factorial(0.0), Value::Double(1.0));
        assert_eq!(factorial(5.0), Value::Double(120.0));
        assert_eq!(factorial(171.0), Value::Error(ErrorKind::Overflow));
        assert_eq!(factorial(-3.0), Value::Error(ErrorKind::Unknown));
    }

    #[test]
    fn test_odd_integer() {
        assert!(is_odd_integer(3.0));
        assert!(is_odd_integer(-5.0));
        assert!(!is_odd_integer(2.0));
        assert!(!is_odd_integer(2.5));
    }
}
