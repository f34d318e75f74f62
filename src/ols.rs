//! Ordinary-least-squares estimator (spec §4.4, Component 4).

/// Result of an OLS fit of `y ~ a + b*x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    /// Intercept.
    pub intercept: f64,
    /// Slope.
    pub slope: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Standard error of the slope.
    pub sem_slope: f64,
}

/// Fits `y ~ a + b*x` by ordinary least squares.
///
/// Undefined when `x.len() < 2` or `x` has zero variance; callers are
/// responsible for never reaching either case (the adaptive sampling engine
/// guarantees both, per spec §4.4).
pub fn fit(x: &[f64], y: &[f64]) -> OlsFit {
    debug_assert_eq!(x.len(), y.len());
    debug_assert!(x.len() >= 2, "OLS fit requires at least 2 points");

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut s_xy = 0.0;
    let mut s_xx = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        s_xy += (xi - mean_x) * (yi - mean_y);
        s_xx += (xi - mean_x) * (xi - mean_x);
    }

    debug_assert!(s_xx > 0.0, "OLS fit requires x to have nonzero variance");

    let slope = s_xy / s_xx;
    let intercept = mean_y - slope * mean_x;

    let mut ss_residual = 0.0;
    let mut ss_total = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let residual = yi - (intercept + slope * xi);
        ss_residual += residual * residual;
        ss_total += (yi - mean_y) * (yi - mean_y);
    }

    let var_residual = ss_residual / n;
    let var_y = ss_total / n;
    let r_squared = if var_y > 0.0 { 1.0 - var_residual / var_y } else { 1.0 };

    let sem_slope = ((ss_residual / (n - 2.0)) / s_xx).sqrt();

    OlsFit { intercept, slope, r_squared, sem_slope }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// P7: an exact linear relationship round-trips with zero residual.
    #[test]
    fn exact_line_round_trips() {
        let x: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|&xi| 3.0 + 5.0 * xi).collect();

        let fit = fit(&x, &y);

        assert!((fit.intercept - 3.0).abs() < 1e-9);
        assert!((fit.slope - 5.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
        assert!(fit.sem_slope.abs() < 1e-9);
    }

    #[test]
    fn noisy_data_has_partial_r_squared() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.1, 3.9, 6.2, 7.8, 10.3];

        let fit = fit(&x, &y);

        assert!(fit.r_squared > 0.9 && fit.r_squared <= 1.0);
        assert!(fit.sem_slope >= 0.0);
    }
}
