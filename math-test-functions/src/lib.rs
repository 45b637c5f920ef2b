//! Bounded two-dimensional benchmark functions for global optimizers.
//!
//! Every function lives on a closed rectangular domain and refuses to be
//! evaluated outside of it. Optimizers are expected to keep their candidates
//! inside [`BoundedFunction2D::domain`]; a [`DomainError`] coming back from
//! [`BoundedFunction2D::evaluate`] means they did not.
//!
//! # Example
//!
//! ```rust
//! use math_test_functions::{BoundedFunction2D, Rastrigin};
//!
//! let f = Rastrigin::default();
//! assert!(f.evaluate(0.0, 0.0).unwrap().abs() < 1e-12);
//! assert!(f.evaluate(-5.13, 0.0).is_err());
//! ```
#![warn(missing_docs)]

use ndarray::{Array, Array1, Array2, ArrayView, ArrayView2, Dimension, Zip};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Domain violation errors.
pub mod error;
pub use error::DomainError;

/// Benchmark function implementations, one per file.
pub mod functions;
pub use functions::*;

/// Closed interval `[lower, upper]` along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Smallest admissible value
    pub lower: f64,
    /// Largest admissible value
    pub upper: f64,
}

impl Interval {
    /// Creates the interval `[lower, upper]`.
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Inclusive membership test. NaN is never contained.
    pub fn contains(&self, v: f64) -> bool {
        self.lower <= v && v <= self.upper
    }

    /// Length of the interval.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// Rectangular domain `x × y` of a two-dimensional function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain2D {
    /// Admissible range of the first coordinate
    pub x: Interval,
    /// Admissible range of the second coordinate
    pub y: Interval,
}

impl Domain2D {
    /// Creates a domain from its two intervals.
    pub const fn new(x: Interval, y: Interval) -> Self {
        Self { x, y }
    }

    /// Square domain `[lower, upper]²`.
    pub const fn square(lower: f64, upper: f64) -> Self {
        Self::new(Interval::new(lower, upper), Interval::new(lower, upper))
    }

    /// Returns `true` if `(x, y)` lies inside the domain, boundary included.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x.contains(x) && self.y.contains(y)
    }

    /// Fails with [`DomainError::OutOfDomain`] if `(x, y)` lies outside.
    pub fn check(&self, x: f64, y: f64) -> Result<(), DomainError> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(DomainError::OutOfDomain {
                x,
                y,
                x_lower: self.x.lower,
                x_upper: self.x.upper,
                y_lower: self.y.lower,
                y_upper: self.y.upper,
            })
        }
    }
}

impl fmt::Display for Domain2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.x, self.y)
    }
}

/// A scalar cost function over a bounded rectangle of the plane.
///
/// Implementors only provide the raw formula in
/// [`value_unchecked`](Self::value_unchecked); the domain-checked scalar and
/// vectorized entry points are derived from it.
pub trait BoundedFunction2D: Send + Sync {
    /// Short identifier, also used to name output files.
    fn name(&self) -> &str;

    /// Rectangle on which the function is defined.
    fn domain(&self) -> Domain2D;

    /// Raw formula, without any domain check.
    fn value_unchecked(&self, x: f64, y: f64) -> f64;

    /// Evaluates the function at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfDomain`] if the point is outside
    /// [`domain`](Self::domain).
    fn evaluate(&self, x: f64, y: f64) -> Result<f64, DomainError> {
        self.domain().check(x, y)?;
        Ok(self.value_unchecked(x, y))
    }

    /// Vectorized evaluation over two same-shaped coordinate grids.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ShapeMismatch`] if the grids differ in shape and
    /// [`DomainError::OutOfDomain`] for the first point outside the domain.
    fn evaluate_grid(
        &self,
        xs: ArrayView2<'_, f64>,
        ys: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, DomainError> {
        evaluate_array(self, xs, ys)
    }

    /// Known global minimum `(position, value)`, if any.
    fn global_minimum(&self) -> Option<([f64; 2], f64)> {
        None
    }
}

impl<T: BoundedFunction2D + ?Sized> BoundedFunction2D for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn domain(&self) -> Domain2D {
        (**self).domain()
    }
    fn value_unchecked(&self, x: f64, y: f64) -> f64 {
        (**self).value_unchecked(x, y)
    }
    fn evaluate(&self, x: f64, y: f64) -> Result<f64, DomainError> {
        (**self).evaluate(x, y)
    }
    fn evaluate_grid(
        &self,
        xs: ArrayView2<'_, f64>,
        ys: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, DomainError> {
        (**self).evaluate_grid(xs, ys)
    }
    fn global_minimum(&self) -> Option<([f64; 2], f64)> {
        (**self).global_minimum()
    }
}

impl<T: BoundedFunction2D + ?Sized> BoundedFunction2D for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn domain(&self) -> Domain2D {
        (**self).domain()
    }
    fn value_unchecked(&self, x: f64, y: f64) -> f64 {
        (**self).value_unchecked(x, y)
    }
    fn evaluate(&self, x: f64, y: f64) -> Result<f64, DomainError> {
        (**self).evaluate(x, y)
    }
    fn evaluate_grid(
        &self,
        xs: ArrayView2<'_, f64>,
        ys: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, DomainError> {
        (**self).evaluate_grid(xs, ys)
    }
    fn global_minimum(&self) -> Option<([f64; 2], f64)> {
        (**self).global_minimum()
    }
}

impl<T: BoundedFunction2D + ?Sized> BoundedFunction2D for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn domain(&self) -> Domain2D {
        (**self).domain()
    }
    fn value_unchecked(&self, x: f64, y: f64) -> f64 {
        (**self).value_unchecked(x, y)
    }
    fn evaluate(&self, x: f64, y: f64) -> Result<f64, DomainError> {
        (**self).evaluate(x, y)
    }
    fn evaluate_grid(
        &self,
        xs: ArrayView2<'_, f64>,
        ys: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, DomainError> {
        (**self).evaluate_grid(xs, ys)
    }
    fn global_minimum(&self) -> Option<([f64; 2], f64)> {
        (**self).global_minimum()
    }
}

/// Element-wise, domain-checked evaluation of `f` over arrays of any shape.
///
/// # Errors
///
/// Same as [`BoundedFunction2D::evaluate_grid`].
pub fn evaluate_array<F, D>(
    f: &F,
    xs: ArrayView<'_, f64, D>,
    ys: ArrayView<'_, f64, D>,
) -> Result<Array<f64, D>, DomainError>
where
    F: BoundedFunction2D + ?Sized,
    D: Dimension,
{
    if xs.shape() != ys.shape() {
        return Err(DomainError::ShapeMismatch {
            x_shape: xs.shape().to_vec(),
            y_shape: ys.shape().to_vec(),
        });
    }

    let domain = f.domain();
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        domain.check(x, y)?;
    }

    let mut out = Array::<f64, D>::zeros(xs.raw_dim());
    Zip::from(&mut out)
        .and(&xs)
        .and(&ys)
        .for_each(|z, &x, &y| *z = f.value_unchecked(x, y));
    Ok(out)
}

/// Coordinate matrices from coordinate vectors, `ij`-indexed by `(row = y, column = x)`.
pub fn meshgrid(xs: &Array1<f64>, ys: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let shape = (ys.len(), xs.len());
    let gx = Array2::from_shape_fn(shape, |(_, j)| xs[j]);
    let gy = Array2::from_shape_fn(shape, |(i, _)| ys[i]);
    (gx, gy)
}

/// Evenly spaced `nx × ny` grid covering `domain`, boundaries included.
///
/// Returns the axis vectors together with the coordinate matrices.
pub fn linspace_grid(
    domain: &Domain2D,
    nx: usize,
    ny: usize,
) -> (Array1<f64>, Array1<f64>, Array2<f64>, Array2<f64>) {
    let xs = axis(domain.x, nx);
    let ys = axis(domain.y, ny);
    let (gx, gy) = meshgrid(&xs, &ys);
    (xs, ys, gx, gy)
}

fn axis(interval: Interval, n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, interval.lower),
        _ => Array1::from_shape_fn(n, |i| {
            if i == n - 1 {
                // linspace rounding can overshoot the upper edge by one ulp
                interval.upper
            } else {
                interval.lower + interval.width() * i as f64 / (n - 1) as f64
            }
        }),
    }
}

/// Metadata for a benchmark function: domain, optima and a short description.
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name
    pub name: String,
    /// Domain on which the function is defined
    pub domain: Domain2D,
    /// Global minima locations and values
    pub global_minima: Vec<([f64; 2], f64)>,
    /// Description of the function
    pub description: String,
    /// Whether the function is multimodal
    pub multimodal: bool,
}

/// Get metadata for all available benchmark functions.
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    let mut metadata = HashMap::new();

    metadata.insert(
        "himmelblau".to_string(),
        FunctionMetadata {
            name: "himmelblau".to_string(),
            domain: Himmelblau.domain(),
            global_minima: HIMMELBLAU_MINIMA.iter().map(|&p| (p, 0.0)).collect(),
            description: "Himmelblau function with four identical global minima".to_string(),
            multimodal: true,
        },
    );

    metadata.insert(
        "rastrigin".to_string(),
        FunctionMetadata {
            name: "rastrigin".to_string(),
            domain: Rastrigin::default().domain(),
            global_minima: vec![([0.0, 0.0], 0.0)],
            description: "Highly multimodal Rastrigin function".to_string(),
            multimodal: true,
        },
    );

    metadata.insert(
        "sphere".to_string(),
        FunctionMetadata {
            name: "sphere".to_string(),
            domain: Sphere.domain(),
            global_minima: vec![([0.0, 0.0], 0.0)],
            description: "Convex sphere function".to_string(),
            multimodal: false,
        },
    );

    metadata
}

/// Names of every function known to [`function_by_name`], sorted.
pub fn available_functions() -> Vec<String> {
    let mut names: Vec<String> = get_function_metadata().into_keys().collect();
    names.sort();
    names
}

/// Looks a benchmark function up by name, ignoring case.
pub fn function_by_name(name: &str) -> Option<Box<dyn BoundedFunction2D>> {
    match name.trim().to_lowercase().as_str() {
        "rastrigin" => Some(Box::new(Rastrigin::default())),
        "sphere" => Some(Box::new(Sphere)),
        "himmelblau" => Some(Box::new(Himmelblau)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array3, array};

    #[test]
    fn test_interval_contains_is_inclusive() {
        let i = Interval::new(-1.0, 1.0);
        assert!(i.contains(-1.0));
        assert!(i.contains(1.0));
        assert!(!i.contains(1.0 + 1e-12));
        assert!(!i.contains(f64::NAN));
    }

    #[test]
    fn test_domain_check_reports_point() {
        let d = Domain2D::square(-5.12, 5.12);
        let err = d.check(-5.13, 0.0).unwrap_err();
        match err {
            DomainError::OutOfDomain { x, y, .. } => {
                assert_eq!(x, -5.13);
                assert_eq!(y, 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(d.check(5.12, -5.12).is_ok());
    }

    #[test]
    fn test_evaluate_grid_matches_scalar() {
        let f = Rastrigin::default();
        let (_, _, gx, gy) = linspace_grid(&f.domain(), 7, 5);
        let z = f.evaluate_grid(gx.view(), gy.view()).unwrap();

        assert_eq!(z.dim(), (5, 7));
        for ((i, j), &v) in z.indexed_iter() {
            let expected = f.evaluate(gx[(i, j)], gy[(i, j)]).unwrap();
            assert_eq!(v, expected);
        }
    }

    #[test]
    fn test_evaluate_grid_rejects_shape_mismatch() {
        let f = Sphere;
        let xs = Array2::<f64>::zeros((2, 3));
        let ys = Array2::<f64>::zeros((3, 2));
        let err = f.evaluate_grid(xs.view(), ys.view()).unwrap_err();
        assert!(matches!(err, DomainError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_evaluate_grid_rejects_out_of_domain_element() {
        let f = Rastrigin::default();
        let xs = array![[0.0, 1.0], [2.0, 6.0]];
        let ys = array![[0.0, 0.0], [0.0, 0.0]];
        let err = f.evaluate_grid(xs.view(), ys.view()).unwrap_err();
        assert!(err.is_out_of_domain());
    }

    #[test]
    fn test_evaluate_array_any_dimension() {
        let f = Sphere;
        let xs = Array3::<f64>::from_elem((2, 2, 2), 1.0);
        let ys = Array3::<f64>::from_elem((2, 2, 2), 2.0);
        let z = evaluate_array(&f, xs.view(), ys.view()).unwrap();
        assert_eq!(z.shape(), &[2, 2, 2]);
        assert!(z.iter().all(|&v| v == 5.0));
    }

    #[test]
    fn test_linspace_grid_hits_both_edges() {
        let d = Domain2D::square(-5.12, 5.12);
        let (xs, ys, gx, gy) = linspace_grid(&d, 100, 50);
        assert_eq!(xs[0], -5.12);
        assert_eq!(xs[99], 5.12);
        assert_eq!(ys[49], 5.12);
        assert_relative_eq!(gx[(3, 10)], xs[10]);
        assert_relative_eq!(gy[(3, 10)], ys[3]);
    }

    #[test]
    fn test_function_by_name_is_case_insensitive() {
        let f = function_by_name("Rastrigin").expect("rastrigin is registered");
        assert_eq!(f.name(), "rastrigin");
        assert!(function_by_name("nope").is_none());
    }

    #[test]
    fn test_metadata_matches_registry() {
        let metadata = get_function_metadata();
        for name in available_functions() {
            let f = function_by_name(&name).expect("listed functions resolve");
            let meta = &metadata[&name];
            assert_eq!(meta.domain, f.domain());
            for (p, v) in &meta.global_minima {
                assert!(meta.domain.contains(p[0], p[1]));
                assert_relative_eq!(f.evaluate(p[0], p[1]).unwrap(), *v, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_smart_pointers_forward() {
        let boxed: Box<dyn BoundedFunction2D> = Box::new(Sphere);
        let shared = Arc::new(Sphere);
        assert_eq!(boxed.evaluate(1.0, 1.0).unwrap(), 2.0);
        assert_eq!(shared.evaluate(1.0, 1.0).unwrap(), 2.0);
        assert_eq!((&shared).name(), "sphere");
    }

    /// Overrides both entry points so forwarding can be told apart from the defaults
    struct Shifted;

    impl BoundedFunction2D for Shifted {
        fn name(&self) -> &str {
            "shifted"
        }
        fn domain(&self) -> Domain2D {
            Domain2D::square(-1.0, 1.0)
        }
        fn value_unchecked(&self, _x: f64, _y: f64) -> f64 {
            0.0
        }
        fn evaluate(&self, _x: f64, _y: f64) -> Result<f64, DomainError> {
            Ok(1.0)
        }
        fn evaluate_grid(
            &self,
            xs: ArrayView2<'_, f64>,
            _ys: ArrayView2<'_, f64>,
        ) -> Result<Array2<f64>, DomainError> {
            Ok(Array2::from_elem(xs.raw_dim(), 7.0))
        }
    }

    fn through<F: BoundedFunction2D>(f: F) -> (f64, Array2<f64>) {
        let (_, _, gx, gy) = linspace_grid(&f.domain(), 3, 2);
        (
            f.evaluate(0.0, 0.0).unwrap(),
            f.evaluate_grid(gx.view(), gy.view()).unwrap(),
        )
    }

    #[test]
    fn test_smart_pointers_forward_overrides() {
        let expected = (1.0, Array2::from_elem((2, 3), 7.0));

        assert_eq!(through(&Shifted), expected);
        let boxed: Box<dyn BoundedFunction2D> = Box::new(Shifted);
        assert_eq!(through(boxed), expected);
        assert_eq!(through(Arc::new(Shifted)), expected);
    }
}
