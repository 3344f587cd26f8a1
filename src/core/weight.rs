use super::state::Vruntime;

/// Load of a priority-0 process, as in the Linux scheduler.
pub const NICE_0_LOAD: f64 = 1024.0;

const PRIORITY_STEP: f64 = 1.25;

// vruntime is kept in fixed point: one unit of work at priority 0 is 1024
const VRUNTIME_SCALE: f64 = 1024.0;

/// Scheduling weight for `priority`. Lower numbers are higher priority and
/// get a larger weight; each step away from 0 scales the weight by 1.25.
pub fn weight(priority: i32) -> f64 {
    NICE_0_LOAD * PRIORITY_STEP.powi(-priority)
}

/// Virtual runtime accrued by `units` of work at `priority`, truncated toward
/// zero.
pub fn vruntime_delta(units: i64, priority: i32) -> Vruntime {
    // NICE_0_LOAD / weight(priority) reduces to 1.25^priority; taking the power
    // directly keeps the exact powers exact
    let scale = PRIORITY_STEP.powi(priority);
    (units as f64 * VRUNTIME_SCALE * scale) as Vruntime
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_zero_is_base_load() {
        assert_eq!(weight(0), 1024.0);
        assert_eq!(vruntime_delta(1, 0), 1024);
        assert_eq!(vruntime_delta(11, 0), 11 * 1024);
    }

    #[test]
    fn weight_strictly_decreases_with_priority() {
        for p in -20..19 {
            assert!(weight(p) > weight(p + 1), "weight({p}) <= weight({})", p + 1);
        }
    }

    #[test]
    fn lower_priority_accrues_faster() {
        assert_eq!(vruntime_delta(1, 1), 1280);
        assert_eq!(vruntime_delta(1, 2), 1600);
        assert_eq!(vruntime_delta(1, -1), 819);
        assert_eq!(vruntime_delta(0, 5), 0);
    }
}
