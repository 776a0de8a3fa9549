use super::{Formatter, ReportUnits};
use crate::result::SimulationResult;
use crate::units::phase_to_distance;

/// One row per time sample
pub struct CsvFormatter {
    units: ReportUnits,
}

impl CsvFormatter {
    pub fn new(units: ReportUnits) -> Self {
        Self { units }
    }

    fn header(&self, num_components: usize) -> String {
        let a = self.units.angle;
        let l = self.units.length;
        let mut columns = vec![
            "time_ns".to_string(),
            format!("distance_{}", l),
            format!("gt_phase_{}", a),
            format!("simulated_phase_{}", a),
            format!("cyclic_error_{}", a),
            format!("cyclic_error_{}", l),
        ];
        columns.extend((0..num_components).map(|c| format!("correlation_{}", c)));
        columns.join(",")
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, result: &SimulationResult) -> String {
        let u = &self.units;
        let range = result.unambiguous_range();
        let mut lines = Vec::with_capacity(result.num_time_samples() + 1);
        lines.push(self.header(result.num_components()));

        for i in 0..result.num_time_samples() {
            let error = result.cyclic_error()[i];
            let mut row = format!(
                "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
                result.time()[i] * 1e9,
                u.length(result.ground_truth_distance()[i]),
                u.angle(result.ground_truth_phase()[i]),
                u.angle(result.simulated_phase()[i]),
                u.angle(error),
                u.length(phase_to_distance(error, range)),
            );
            for ch in result.channels() {
                row.push_str(&format!(",{:.6}", ch.correlation[i]));
            }
            lines.push(row);
        }

        lines.join("\n")
    }
}
