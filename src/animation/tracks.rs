use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    Linear,
    Step,
}

/// Immutable keyframe data: parallel `times` / `values` arrays.
///
/// Sampling clamps outside the keyed range: before the first key the first
/// value is returned, past the last key the last value.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: Interpolation,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// `times` must be non-empty, ascending, and the same length as `values`.
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: Interpolation) -> Self {
        debug_assert!(!times.is_empty(), "track must have at least one keyframe");
        debug_assert_eq!(times.len(), values.len());
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// End time of the track (time of the last keyframe).
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        let len = self.times.len();
        if len == 1 {
            return self.values[0];
        }

        // partition_point finds the first index with t > time, i.e. the index
        // of the next keyframe
        let next = self.times.partition_point(|&t| t <= time);
        if next == 0 {
            return self.values[0];
        }
        if next >= len {
            return self.values[len - 1];
        }

        let index = next - 1;
        let t0 = self.times[index];
        let t1 = self.times[next];
        let span = t1 - t0;

        let t = if span > 1e-6 {
            ((time - t0) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        match self.interpolation {
            Interpolation::Step => self.values[index],
            Interpolation::Linear => T::interpolate_linear(self.values[index], self.values[next], t),
        }
    }
}
