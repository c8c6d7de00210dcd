//! Bracketed root finding and scalar minimisation.
//!
//! Both routines are Brent's methods: the root finder mixes bisection with
//! secant and inverse quadratic steps, the minimiser mixes golden-section
//! search with parabolic interpolation. Neither knows anything about
//! strafing; they take a closure and a bracket.

use crate::constants::{
    BRACKET_MAX_EXPANSIONS, MINIMIZE_MAX_ITER, MINIMIZE_TOLERANCE, ROOT_FINDING_MAX_ITER,
    ROOT_FINDING_TOLERANCE,
};
use crate::error::{DomainError, Result};
use tracing::trace;

/// Golden ratio, used to grow brackets
const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// 1 - 1/φ, the golden-section step fraction
const GOLDEN_SECTION: f64 = 0.381_966_011_250_105_1;

/// Options for [`find_root`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootOptions {
    /// Absolute tolerance on the root location
    pub xtol: f64,
    /// Stop early once |f(x)| falls to this value (0 disables)
    pub ftol: f64,
    pub max_iterations: usize,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            xtol: ROOT_FINDING_TOLERANCE,
            ftol: 0.0,
            max_iterations: ROOT_FINDING_MAX_ITER,
        }
    }
}

/// Options for [`minimize_scalar`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeOptions {
    /// Absolute tolerance on the minimiser location
    pub xatol: f64,
    pub max_iterations: usize,
    /// Cap on golden-ratio expansions when no bracket is supplied
    pub max_bracket_expansions: usize,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            xatol: MINIMIZE_TOLERANCE,
            max_iterations: MINIMIZE_MAX_ITER,
            max_bracket_expansions: BRACKET_MAX_EXPANSIONS,
        }
    }
}

/// Result of root finding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    pub root: f64,
    pub iterations: usize,
    /// |f(root)|
    pub residual: f64,
    pub converged: bool,
}

/// Result of scalar minimisation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeResult {
    pub x: f64,
    pub fx: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Brent's method for root finding.
///
/// `f(lo)` and `f(hi)` must have opposite signs, or one of them must be
/// exactly zero. Never slower than bisection; superlinear while the
/// interpolation steps stay inside the bracket. Running out of iterations
/// is not an error: the best estimate comes back with `converged: false`.
pub fn find_root<F>(f: F, lo: f64, hi: f64, options: &RootOptions) -> Result<RootResult>
where
    F: Fn(f64) -> f64,
{
    if !lo.is_finite() || !hi.is_finite() {
        return Err(DomainError::InvalidBracket { lo, hi });
    }

    let mut a = lo;
    let mut b = hi;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa.is_nan() {
        return Err(DomainError::NonFiniteEvaluation { x: a });
    }
    if fb.is_nan() {
        return Err(DomainError::NonFiniteEvaluation { x: b });
    }
    if fa == 0.0 {
        return Ok(RootResult { root: a, iterations: 0, residual: 0.0, converged: true });
    }
    if fb == 0.0 {
        return Ok(RootResult { root: b, iterations: 0, residual: 0.0, converged: true });
    }

    // Ensure the root is bracketed
    if fa.signum() == fb.signum() {
        return Err(DomainError::NotBracketed { lo, hi, f_lo: fa, f_hi: fb });
    }

    // c is the contrapoint: f(b) and f(c) always have opposite signs
    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 1..=options.max_iterations {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }

        // Keep b as the best estimate
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tolerance_scaled = 2.0 * f64::EPSILON * b.abs() + 0.5 * options.xtol;
        let m = 0.5 * (c - b);

        if m.abs() <= tolerance_scaled || fb == 0.0 || fb.abs() <= options.ftol {
            trace!(iteration, root = b, residual = fb.abs(), "root converged");
            return Ok(RootResult {
                root: b,
                iterations: iteration,
                residual: fb.abs(),
                converged: true,
            });
        }

        if e.abs() >= tolerance_scaled && fa.abs() > fb.abs() {
            let s = fb / fa;
            let mut p;
            let mut q;

            if a == c {
                // Secant step
                p = 2.0 * m * s;
                q = 1.0 - s;
            } else {
                // Inverse quadratic interpolation
                q = fa / fc;
                let r = fb / fc;
                p = s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0));
                q = (q - 1.0) * (r - 1.0) * (s - 1.0);
            }

            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            // Accept the interpolation only if it stays well inside the bracket
            // and shrinks faster than the step before last
            let bound_inside = 3.0 * m * q - (tolerance_scaled * q).abs();
            let bound_shrink = (e * q).abs();
            if 2.0 * p < bound_inside.min(bound_shrink) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = d;
            }
        } else {
            d = m;
            e = d;
        }

        a = b;
        fa = fb;

        if d.abs() > tolerance_scaled {
            b += d;
        } else {
            b += tolerance_scaled.copysign(m);
        }

        fb = f(b);
        if fb.is_nan() {
            return Err(DomainError::NonFiniteEvaluation { x: b });
        }
        trace!(iteration, b, fb, "root iteration");
    }

    Ok(RootResult {
        root: b,
        iterations: options.max_iterations,
        residual: fb.abs(),
        converged: false,
    })
}

/// Minimise a scalar function with Brent's method.
///
/// With `Some((lo, hi))` the search is confined to that interval. With
/// `None` the search runs over x ≥ 0: a bracket is grown from (0, 1) by the
/// golden ratio while f keeps decreasing, then searched.
///
/// Unimodality is the caller's business. On a multimodal f the result is
/// a local minimum. Infinite objective values are tolerated and simply
/// force golden-section steps.
pub fn minimize_scalar<F>(
    f: F,
    bracket: Option<(f64, f64)>,
    options: &MinimizeOptions,
) -> Result<MinimizeResult>
where
    F: Fn(f64) -> f64,
{
    let (lo, hi) = match bracket {
        Some((lo, hi)) => {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(DomainError::InvalidBracket { lo, hi });
            }
            (lo, hi)
        }
        None => bracket_nonnegative(&f, options.max_bracket_expansions)?,
    };

    if lo == hi {
        let fx = f(lo);
        return Ok(MinimizeResult { x: lo, fx, iterations: 0, converged: true });
    }

    Ok(brent_bounded(&f, lo, hi, options))
}

/// Grow a bracket over x ≥ 0 that holds a minimum of a unimodal f.
fn bracket_nonnegative<F>(f: &F, max_expansions: usize) -> Result<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let mut a = 0.0;
    let mut b = 1.0;
    let mut fb = f(b);

    // Already rising: the minimum sits in [0, 1], possibly at 0
    if fb > f(a) {
        return Ok((a, b));
    }

    for _ in 0..max_expansions {
        let c = b + GOLDEN_RATIO * (b - a);
        let fc = f(c);
        if fc >= fb || fc.is_nan() {
            trace!(a, c, "minimum bracketed");
            return Ok((a, c));
        }
        a = b;
        b = c;
        fb = fc;
    }

    Err(DomainError::BracketSearchFailed { iterations: max_expansions })
}

/// Bounded Brent minimisation on [a, b] (golden section + parabolic steps).
fn brent_bounded<F>(f: &F, mut a: f64, mut b: f64, options: &MinimizeOptions) -> MinimizeResult
where
    F: Fn(f64) -> f64,
{
    let sqrt_eps = f64::EPSILON.sqrt();

    // xf: best point so far, nfc: second best, fulc: previous second best
    let mut xf = a + GOLDEN_SECTION * (b - a);
    let mut nfc = xf;
    let mut fulc = xf;
    let mut fx = f(xf);
    let mut fnfc = fx;
    let mut ffulc = fx;

    let mut rat: f64 = 0.0;
    let mut e: f64 = 0.0;

    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + options.xatol / 3.0;
    let mut tol2 = 2.0 * tol1;

    let mut iterations = 0;
    while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        if iterations >= options.max_iterations {
            return MinimizeResult { x: xf, fx, iterations, converged: false };
        }
        iterations += 1;

        let mut golden = true;

        if e.abs() > tol1 {
            // Try a parabola through xf, nfc, fulc. With infinite values the
            // arithmetic goes NaN and every comparison below fails, which
            // falls through to golden section.
            golden = false;
            let mut r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            r = e;
            e = rat;

            if p.abs() < (0.5 * q * r).abs() && p > q * (a - xf) && p < q * (b - xf) {
                rat = p / q;
                let x = xf + rat;
                // Don't evaluate too close to the ends
                if (x - a) < tol2 || (b - x) < tol2 {
                    rat = if xm - xf >= 0.0 { tol1 } else { -tol1 };
                }
            } else {
                golden = true;
            }
        }

        if golden {
            e = if xf >= xm { a - xf } else { b - xf };
            rat = GOLDEN_SECTION * e;
        }

        let step = rat.abs().max(tol1);
        let x = if rat >= 0.0 { xf + step } else { xf - step };
        let fu = f(x);

        if fu <= fx {
            if x >= xf {
                a = xf;
            } else {
                b = xf;
            }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf {
                a = x;
            } else {
                b = x;
            }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + options.xatol / 3.0;
        tol2 = 2.0 * tol1;
        trace!(iterations, x = xf, fx, "minimize iteration");
    }

    MinimizeResult { x: xf, fx, iterations, converged: true }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_root_quadratic() {
        // x^2 - 4 = 0, root at x = 2
        let f = |x: f64| x * x - 4.0;
        let result = find_root(f, 1.0, 3.0, &RootOptions::default()).unwrap();

        assert!(result.converged);
        assert!((result.root - 2.0).abs() < 1e-10);
        assert!(result.iterations > 0);
        assert!(result.residual < 1e-9);
    }

    #[test]
    fn test_find_root_linear() {
        let f = |x: f64| 2.0 * x - 6.0;
        let result = find_root(f, 0.0, 5.0, &RootOptions::default()).unwrap();

        assert!(result.converged);
        assert!((result.root - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_find_root_reversed_bracket() {
        let f = |x: f64| x.cos() - x;
        let result = find_root(f, 1.0, 0.0, &RootOptions::default()).unwrap();
        assert!((result.root - 0.739_085_133_215_160_6).abs() < 1e-10);
    }

    #[test]
    fn test_find_root_no_bracket() {
        // Always positive
        let f = |x: f64| x * x + 1.0;
        let result = find_root(f, 1.0, 3.0, &RootOptions::default());

        assert!(matches!(result, Err(DomainError::NotBracketed { .. })));
    }

    #[test]
    fn test_find_root_endpoint_is_root() {
        let f = |x: f64| x - 1.0;
        let result = find_root(f, 1.0, 5.0, &RootOptions::default()).unwrap();
        assert_eq!(result.root, 1.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_find_root_nan_endpoint() {
        let f = |x: f64| if x < 0.5 { f64::NAN } else { x - 1.0 };
        assert!(matches!(
            find_root(f, 0.0, 2.0, &RootOptions::default()),
            Err(DomainError::NonFiniteEvaluation { .. })
        ));
    }

    #[test]
    fn test_find_root_wide_bracket() {
        let f = |x: f64| x.exp() - 1e3;
        let result = find_root(f, -1e4, 20.0, &RootOptions::default()).unwrap();
        assert!(result.converged);
        assert!((result.root - 1e3f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_find_root_iteration_cap() {
        let options = RootOptions { max_iterations: 2, ..RootOptions::default() };
        let f = |x: f64| x.powi(3) - 2.0;
        let result = find_root(f, 0.0, 100.0, &options).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 2);
    }

    #[test]
    fn test_minimize_bounded_parabola() {
        let f = |x: f64| (x - 2.0) * (x - 2.0) + 1.0;
        let result = minimize_scalar(f, Some((0.0, 5.0)), &MinimizeOptions::default()).unwrap();

        assert!(result.converged);
        assert!((result.x - 2.0).abs() < 1e-7);
        assert!((result.fx - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_minimize_bounded_minimum_at_edge() {
        let f = |x: f64| x;
        let result = minimize_scalar(f, Some((0.0, 1.0)), &MinimizeOptions::default()).unwrap();
        assert!(result.x.abs() < 1e-8);
    }

    #[test]
    fn test_minimize_unbounded_far_minimum() {
        let f = |x: f64| (x - 1234.5).powi(2);
        let result = minimize_scalar(f, None, &MinimizeOptions::default()).unwrap();
        assert!((result.x - 1234.5).abs() < 1e-3);
    }

    #[test]
    fn test_minimize_unbounded_minimum_at_zero() {
        let f = |x: f64| x * x + 3.0 * x;
        let result = minimize_scalar(f, None, &MinimizeOptions::default()).unwrap();
        assert!(result.x.abs() < 1e-8);
    }

    #[test]
    fn test_minimize_tolerates_infinite_values() {
        let f = |x: f64| if x < 0.5 { f64::INFINITY } else { (x - 3.0).powi(2) };
        let result = minimize_scalar(f, None, &MinimizeOptions::default()).unwrap();
        assert!((result.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_minimize_unbounded_decreasing_fails() {
        let f = |x: f64| -x;
        let result = minimize_scalar(f, None, &MinimizeOptions::default());
        assert!(matches!(result, Err(DomainError::BracketSearchFailed { .. })));
    }

    #[test]
    fn test_minimize_invalid_bracket() {
        let f = |x: f64| x * x;
        let result = minimize_scalar(f, Some((2.0, 1.0)), &MinimizeOptions::default());
        assert!(matches!(result, Err(DomainError::InvalidBracket { .. })));
    }
}
