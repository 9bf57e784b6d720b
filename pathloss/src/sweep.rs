use crate::error::PathlossError;
use num_traits::{AsPrimitive, Float};

/// Evenly spaced sample distances, `start + i·step`, stopping before
/// `stop`.
#[derive(Debug, Clone)]
pub struct Sweep<T> {
    start: T,
    step: T,
    total_points: usize,
    current_point: usize,
}

impl<T> Sweep<T>
where
    T: Float + AsPrimitive<usize> + AsPrimitive<f64>,
    usize: AsPrimitive<T>,
{
    /// Returns a sweep over `[start, stop)` in increments of `step`.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn new(start: T, stop: T, step: T) -> Result<Self, PathlossError> {
        if !(step.is_finite() && step > T::zero()) {
            return Err(PathlossError::SweepStep(AsPrimitive::<f64>::as_(step)));
        }
        // Also rejects NaN bounds.
        if !(stop >= start) || !(stop - start).is_finite() {
            return Err(PathlossError::SweepRange {
                start: AsPrimitive::<f64>::as_(start),
                stop: AsPrimitive::<f64>::as_(stop),
            });
        }
        let total_points = AsPrimitive::<usize>::as_(((stop - start) / step).ceil());
        Ok(Self {
            start,
            step,
            total_points,
            current_point: 0,
        })
    }

    /// Returns the sweep used for plotting a link out to `max_m`:
    /// starting at 1 m and running up to, but excluding, `max_m + 1`.
    pub fn to_distance(max_m: T, step: T) -> Result<Self, PathlossError> {
        Self::new(T::one(), max_m + T::one(), step)
    }
}

impl<T> Sweep<T>
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    /// Last sample this sweep will yield, if any.
    pub fn last_point(&self) -> Option<T> {
        (self.current_point < self.total_points).then(|| self.point(self.total_points - 1))
    }

    fn point(&self, n: usize) -> T {
        let n: T = n.as_();
        self.start + n * self.step
    }
}

impl<T> Iterator for Sweep<T>
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.current_point < self.total_points {
            let point = self.point(self.current_point);
            self.current_point += 1;
            Some(point)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_points - self.current_point;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Sweep<T>
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    fn len(&self) -> usize {
        self.total_points - self.current_point
    }
}

#[cfg(test)]
mod tests {
    use super::Sweep;
    use crate::PathlossError;

    #[test]
    fn test_lab_sweeps() {
        let sweep = Sweep::to_distance(100.0, 0.25).unwrap();
        assert_eq!(sweep.len(), 400);
        assert_eq!(sweep.last_point(), Some(100.75));
        let points: Vec<f64> = sweep.collect();
        assert_eq!(&points[..3], &[1.0, 1.25, 1.5]);
        assert_eq!(points.last(), Some(&100.75));

        let sweep = Sweep::to_distance(10_000.0, 0.25).unwrap();
        assert_eq!(sweep.len(), 40_000);
        assert_eq!(sweep.last_point(), Some(10_000.75));
    }

    #[test]
    fn test_partial_step() {
        // [0, 1) in steps of 0.3 -> 0, 0.3, 0.6, 0.9
        let points: Vec<f64> = Sweep::new(0.0, 1.0, 0.3).unwrap().collect();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], 0.0);
        assert!(points[3] < 1.0);
    }

    #[test]
    fn test_len_shrinks() {
        let mut sweep = Sweep::new(1.0_f32, 3.0, 0.5).unwrap();
        assert_eq!(sweep.len(), 4);
        assert_eq!(sweep.next(), Some(1.0));
        assert_eq!(sweep.next(), Some(1.5));
        assert_eq!(sweep.len(), 2);
        assert_eq!(sweep.size_hint(), (2, Some(2)));
        assert_eq!(sweep.last_point(), Some(2.5));
    }

    #[test]
    fn test_empty_sweep() {
        let mut sweep = Sweep::new(5.0, 5.0, 1.0).unwrap();
        assert_eq!(sweep.len(), 0);
        assert_eq!(sweep.last_point(), None);
        assert!(sweep.next().is_none());
    }

    #[test]
    fn test_invalid_step() {
        for step in [0.0, -0.25, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Sweep::new(1.0, 10.0, step),
                Err(PathlossError::SweepStep(_))
            ));
        }
    }

    #[test]
    fn test_invalid_range() {
        assert_eq!(
            Sweep::new(10.0, 1.0, 0.25).unwrap_err(),
            PathlossError::SweepRange {
                start: 10.0,
                stop: 1.0
            }
        );
        assert!(Sweep::new(f64::NAN, 1.0, 0.25).is_err());
        assert!(Sweep::new(1.0, f64::INFINITY, 0.25).is_err());
    }
}
