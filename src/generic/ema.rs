/*!
Exponential moving averages with bias correction.

An average with smoothing factor `alpha` keeps a biased average `b` updated by `b += alpha * (y - b)`.
As `b` starts at zero, early values would be pulled towards zero, and so the average reported is `b / (1 - beta^t)` with `beta = 1 - alpha` and `t` the number of updates, until `beta^t` is negligible.
*/

/// An exponential moving average.
#[derive(Clone, Debug)]
pub struct Ema {
    value: f64,
    biased: f64,
    alpha: f64,
    beta: f64,

    /// `beta^t`, or zero once negligible.
    exp: f64,
}

impl Ema {
    /// An average over (roughly) the last `window` values.
    pub fn new(window: f64) -> Self {
        let alpha = 1.0 / window.max(1.0);
        Ema {
            value: 0.0,
            biased: 0.0,
            alpha,
            beta: 1.0 - alpha,
            exp: 1.0,
        }
    }

    /// Updates the average with `y`.
    pub fn update(&mut self, y: f64) {
        self.biased += self.alpha * (y - self.biased);
        if self.exp > 0.0 {
            self.exp *= self.beta;
            if self.exp < 1e-16 {
                self.exp = 0.0;
            }
            let div = 1.0 - self.exp;
            self.value = self.biased / div;
        } else {
            self.value = self.biased;
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}
