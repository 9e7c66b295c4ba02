use crate::dsp::mac::{high_word, Multiplier};
use crate::dsp::ring::RingCursor;
use crate::dsp::tables::{
    MODE_1_FILTERS, MODE_1_FILTER_BASE, MODE_1_FILTER_TAPS, MODE_2_FILTER, MODE_2_FILTER_BASE,
    MODE_2_SUB_TABLES,
};
use bincode::{Decode, Encode};
use qsound_config::FilterTopology;

const MODE_2_LONG_TAPS: usize = 45;
const MODE_2_SHORT_TAPS: usize = 44;

/// Default filter table selections after init, as ROM addresses
pub const MODE_1_DEFAULT_SELECTORS: [u16; 4] = [0x0DB2, 0x0000, 0x0E11, 0x0000];
pub const MODE_2_DEFAULT_SELECTORS: [u16; 4] = [0x0F73, 0x0FA4, 0x0F73, 0x0FA4];

/// FIR filter whose last tap is applied to the incoming sample and whose other taps are applied
/// to a history ring one entry shorter than the coefficient table.
#[derive(Debug, Clone, Encode, Decode)]
pub struct FirFilter {
    coefficients: Vec<i16>,
    history: Vec<i16>,
    cursor: RingCursor,
}

impl FirFilter {
    fn new(taps: usize, history_address: u16) -> Self {
        let history_len = taps - 1;
        Self {
            coefficients: vec![0; taps],
            history: vec![0; history_len],
            cursor: RingCursor::new(history_address, history_len as u16),
        }
    }

    fn load(&mut self, table: &[u16]) {
        for (coefficient, &word) in self.coefficients.iter_mut().zip(table) {
            *coefficient = word as i16;
        }
    }

    /// Filter one sample. Returns the raw accumulator; the sum is negated, as the DSP subtracts
    /// each product. The input replaces the oldest history entry.
    fn apply(&mut self, input: i16) -> i32 {
        let mut mac = Multiplier::new();
        let mut acc = 0;

        let Some((&last_coefficient, history_coefficients)) = self.coefficients.split_last() else {
            return 0;
        };
        for &coefficient in history_coefficients {
            mac.subtract_and_multiply(&mut acc);
            mac.x = coefficient;
            mac.y = self.history[self.cursor.index()];
            self.cursor.advance();
        }

        mac.subtract_and_multiply(&mut acc);
        mac.x = last_coefficient;
        mac.y = input;
        mac.subtract_and_multiply(&mut acc);

        self.history[self.cursor.index()] = input;
        self.cursor.advance();

        mac.drain_subtract(&mut acc);
        acc
    }
}

/// Mode 2 filter pair for one side. The long stage filters the pan filter tap and the short stage
/// filters the dry signal.
#[derive(Debug, Clone, Encode, Decode)]
pub struct CascadedFir {
    long: FirFilter,
    short: FirFilter,
}

/// Filtered outputs for one side, ready to be written to the wet and dry delay lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutput {
    pub wet: i16,
    pub dry: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Encode, Decode)]
pub enum FilterBank {
    Single { left: FirFilter, right: FirFilter },
    Cascaded { left: CascadedFir, right: CascadedFir },
}

impl FilterBank {
    pub fn new(topology: FilterTopology) -> Self {
        match topology {
            FilterTopology::Mode1 => Self::Single {
                left: FirFilter::new(MODE_1_FILTER_TAPS, 0x1F9),
                right: FirFilter::new(MODE_1_FILTER_TAPS, 0x257),
            },
            FilterTopology::Mode2 => Self::Cascaded {
                left: CascadedFir {
                    long: FirFilter::new(MODE_2_LONG_TAPS, 0x1FB),
                    short: FirFilter::new(MODE_2_SHORT_TAPS, 0x253),
                },
                // Same stage lengths as the left side
                right: CascadedFir {
                    long: FirFilter::new(MODE_2_LONG_TAPS, 0x227),
                    short: FirFilter::new(MODE_2_SHORT_TAPS, 0x27E),
                },
            },
        }
    }

    pub fn topology(&self) -> FilterTopology {
        match self {
            Self::Single { .. } => FilterTopology::Mode1,
            Self::Cascaded { .. } => FilterTopology::Mode2,
        }
    }

    /// Copy coefficient tables chosen by the four selector registers. Selectors that do not point
    /// at the start of a table leave that filter's coefficients unchanged.
    pub fn load_coefficients(&mut self, selectors: &[u16; 4]) {
        match self {
            Self::Single { left, right } => {
                for (filter, selector) in [(left, selectors[0]), (right, selectors[2])] {
                    match mode_1_table(selector) {
                        Some(table) => filter.load(table),
                        None => log::debug!("Ignoring invalid mode 1 filter selector {selector:04X}"),
                    }
                }
            }
            Self::Cascaded { left, right } => {
                for (filter, long_selector, short_selector) in
                    [(left, selectors[0], selectors[1]), (right, selectors[2], selectors[3])]
                {
                    for (stage, selector, taps) in [
                        (&mut filter.long, long_selector, MODE_2_LONG_TAPS),
                        (&mut filter.short, short_selector, MODE_2_SHORT_TAPS),
                    ] {
                        match mode_2_table(selector, taps) {
                            Some(table) => stage.load(table),
                            None => log::debug!("Ignoring invalid mode 2 filter selector {selector:04X}"),
                        }
                    }
                }
            }
        }
    }

    /// Run one side's filters. `filter_input` is the pan filter tap and `dry` is the unfiltered
    /// mix for the same side.
    pub fn process(&mut self, side: Side, filter_input: i16, dry: i16) -> FilterOutput {
        match self {
            Self::Single { left, right } => {
                let filter = match side {
                    Side::Left => left,
                    Side::Right => right,
                };
                FilterOutput { wet: high_word(filter.apply(filter_input)), dry }
            }
            Self::Cascaded { left, right } => {
                let filter = match side {
                    Side::Left => left,
                    Side::Right => right,
                };
                FilterOutput {
                    wet: high_word(filter.long.apply(filter_input)),
                    dry: high_word(filter.short.apply(dry)),
                }
            }
        }
    }
}

fn mode_1_table(selector: u16) -> Option<&'static [u16]> {
    let offset = selector.checked_sub(MODE_1_FILTER_BASE)?;
    if usize::from(offset) % MODE_1_FILTER_TAPS != 0 {
        return None;
    }

    MODE_1_FILTERS.get(usize::from(offset) / MODE_1_FILTER_TAPS).map(|table| table.as_slice())
}

fn mode_2_table(selector: u16, taps: usize) -> Option<&'static [u16]> {
    let offset = selector.checked_sub(MODE_2_FILTER_BASE)?;
    if !MODE_2_SUB_TABLES.contains(&offset) {
        return None;
    }

    MODE_2_FILTER.get(usize::from(offset)..usize::from(offset) + taps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn table_selection() {
        assert_eq!(mode_1_table(0x0D53), Some(MODE_1_FILTERS[0].as_slice()));
        assert_eq!(mode_1_table(0x0D53 + 4 * 95), Some(MODE_1_FILTERS[4].as_slice()));
        assert_eq!(mode_1_table(0x0D53 + 5 * 95), None);
        assert_eq!(mode_1_table(0x0D54), None);
        assert_eq!(mode_1_table(0x0000), None);

        assert_eq!(mode_2_table(0x0F73, 45), Some(&MODE_2_FILTER[..45]));
        assert_eq!(mode_2_table(0x0FA4, 44), Some(&MODE_2_FILTER[49..93]));
        assert_eq!(mode_2_table(0x0F74, 45), None);
        assert_eq!(mode_2_table(0x0D53, 45), None);
    }

    #[test]
    fn invalid_selector_keeps_coefficients() {
        let mut bank = FilterBank::new(FilterTopology::Mode1);
        bank.load_coefficients(&MODE_1_DEFAULT_SELECTORS);
        bank.load_coefficients(&[0x0D54, 0, 0xFFFF, 0]);

        let FilterBank::Single { left, right } = &bank else { panic!("expected mode 1 filters") };
        let expected_left: Vec<i16> = MODE_1_FILTERS[1].iter().map(|&word| word as i16).collect();
        let expected_right: Vec<i16> = MODE_1_FILTERS[2].iter().map(|&word| word as i16).collect();
        assert_eq!(left.coefficients, expected_left);
        assert_eq!(right.coefficients, expected_right);
    }

    #[test]
    fn impulse_response_is_negated_coefficients() {
        let mut filter = FirFilter::new(5, 0x100);
        filter.load(&[1, 2, 3, 4, 5]);

        // Each output is -4 * sum(c[i] * h[i]) with the input on the last tap; the history is
        // read oldest first, so the impulse walks from the last coefficient to the first
        let outputs: Vec<i32> =
            [0x100_i16, 0, 0, 0, 0, 0].into_iter().map(|input| filter.apply(input)).collect();
        assert_eq!(outputs, vec![-5 * 0x400, -4 * 0x400, -3 * 0x400, -2 * 0x400, -0x400, 0]);
    }

    #[test]
    fn cascaded_stages_are_independent() {
        let mut bank = FilterBank::new(FilterTopology::Mode2);
        assert_eq!(bank.topology(), FilterTopology::Mode2);

        let FilterBank::Cascaded { left, .. } = &mut bank else {
            panic!("expected mode 2 filters");
        };
        left.long.load(&[0x100; 45]);
        left.short.load(&[0x200; 44]);

        let output = bank.process(Side::Left, 0x4000, 0x1000);
        // 0x100 * 0x4000 * -4 = -0x100_0000, high word -0x100
        assert_eq!(output, FilterOutput { wet: -0x100, dry: -0x80 });

        let output = bank.process(Side::Right, 0x4000, 0x1000);
        assert_eq!(output, FilterOutput { wet: 0, dry: 0 });
    }

    #[test]
    fn mode_2_sides_match() {
        let mut bank = FilterBank::new(FilterTopology::Mode2);
        bank.load_coefficients(&[0x0F73; 4]);

        let FilterBank::Cascaded { left, right } = &bank else {
            panic!("expected mode 2 filters");
        };
        for stage in [&left.long, &right.long] {
            assert_eq!((stage.coefficients.len(), stage.history.len()), (45, 44));
        }
        for stage in [&left.short, &right.short] {
            assert_eq!((stage.coefficients.len(), stage.history.len()), (44, 43));
        }
        assert_eq!(left.long.coefficients, right.long.coefficients);

        // Identical input on both sides gives identical output, including once the history fills
        for i in 0..100_i16 {
            let input = i.wrapping_mul(0x0321);
            let left = bank.process(Side::Left, input, -input);
            let right = bank.process(Side::Right, input, -input);
            assert_eq!(left, right, "sample {i}");
        }
    }
}
