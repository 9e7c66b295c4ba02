use crate::dsp::mac::Multiplier;
use crate::dsp::tables::{PAN_TABLE, PAN_TABLE_BASE, PAN_TABLE_LEN};
use bincode::{Decode, Encode};

pub const MIX_CHANNELS: usize = 19;

/// Pan position register value for a centered channel
pub const CENTER_PAN: u16 = 0x120;

// Offset from a left pan position to the matching right pan position
const RIGHT_PAN_OFFSET: u16 = 2 * PAN_TABLE_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanTap {
    Output,
    Filter,
}

/// Read a pan weight. `position` is a ROM address into the left output table, or into the right
/// output table for a cached right position. Addresses outside the tables read as 0.
fn pan_weight(position: u16, tap: PanTap) -> i16 {
    let offset = match tap {
        PanTap::Output => 0,
        PanTap::Filter => PAN_TABLE_LEN,
    };

    position
        .checked_sub(PAN_TABLE_BASE)
        .and_then(|index| PAN_TABLE.get(usize::from(index + offset)))
        .map_or(0, |&weight| weight as i16)
}

/// Raw accumulators from one pan pass. Both sums are negated, as the DSP subtracts products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanSums {
    pub output: i32,
    pub filter: i32,
}

/// Per-channel pan positions plus the right-side positions cached during the left pass.
#[derive(Debug, Clone, Encode, Decode)]
pub struct PanMixer {
    pub positions: [u16; MIX_CHANNELS],
    pub right_positions: [u16; MIX_CHANNELS],
}

impl PanMixer {
    pub fn new() -> Self {
        Self { positions: [CENTER_PAN; MIX_CHANNELS], right_positions: [0; MIX_CHANNELS] }
    }

    /// Left pass. Also caches each channel's right pan position for the right pass.
    pub fn mix_left(&mut self, samples: &[i16; MIX_CHANNELS]) -> PanSums {
        for (right, &left) in self.right_positions.iter_mut().zip(&self.positions) {
            *right = left.wrapping_add(RIGHT_PAN_OFFSET);
        }

        mix(&self.positions, samples)
    }

    /// Right pass, using the positions cached by the most recent left pass.
    pub fn mix_right(&self, samples: &[i16; MIX_CHANNELS]) -> PanSums {
        mix(&self.right_positions, samples)
    }
}

// Every channel issues two multiply-accumulates. The first retires the previous channel's output
// product into the output sum, and the second retires the previous channel's filter product into
// the filter sum. The two trailing accumulates retire the last channel's products.
fn mix(positions: &[u16; MIX_CHANNELS], samples: &[i16; MIX_CHANNELS]) -> PanSums {
    let mut mac = Multiplier::new();
    let mut output_acc = 0;
    let mut filter_acc = 0;

    for (&position, &sample) in positions.iter().zip(samples) {
        mac.subtract_and_multiply(&mut output_acc);
        mac.x = pan_weight(position, PanTap::Output);
        mac.y = sample;

        mac.subtract_and_multiply(&mut filter_acc);
        mac.x = pan_weight(position, PanTap::Filter);
        mac.y = sample;
    }

    mac.subtract_and_multiply(&mut output_acc);
    mac.drain_subtract(&mut filter_acc);

    PanSums { output: output_acc, filter: filter_acc }
}
