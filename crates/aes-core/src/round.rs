//! AES round transformations.
//!
//! The state is a [`Block`] in column-major order: byte `4 * c + r` holds row
//! `r` of column `c`. All byte arithmetic goes through the lookup tables.

use crate::bytes::{substitute, xor_array, Block};
use crate::tables::Tables;

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block, tables: &Tables) {
    substitute(state, tables.sbox);
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block, tables: &Tables) {
    substitute(state, tables.inv_sbox);
}

/// Performs ShiftRows in place: row `r` moves left by `r` columns.
#[inline]
pub fn shift_rows(state: &mut Block) {
    let mut tmp = [0u8; 16];
    tmp[0] = state[0];
    tmp[1] = state[5];
    tmp[2] = state[10];
    tmp[3] = state[15];

    tmp[4] = state[4];
    tmp[5] = state[9];
    tmp[6] = state[14];
    tmp[7] = state[3];

    tmp[8] = state[8];
    tmp[9] = state[13];
    tmp[10] = state[2];
    tmp[11] = state[7];

    tmp[12] = state[12];
    tmp[13] = state[1];
    tmp[14] = state[6];
    tmp[15] = state[11];

    *state = tmp;
}

/// Performs the inverse of ShiftRows in place: row `r` moves right by `r` columns.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    let mut tmp = [0u8; 16];
    tmp[0] = state[0];
    tmp[1] = state[13];
    tmp[2] = state[10];
    tmp[3] = state[7];

    tmp[4] = state[4];
    tmp[5] = state[1];
    tmp[6] = state[14];
    tmp[7] = state[11];

    tmp[8] = state[8];
    tmp[9] = state[5];
    tmp[10] = state[2];
    tmp[11] = state[15];

    tmp[12] = state[12];
    tmp[13] = state[9];
    tmp[14] = state[6];
    tmp[15] = state[3];

    *state = tmp;
}

/// Mixes one column with the `02 03 01 01` circulant matrix.
pub fn mix_single_column(col: &mut [u8; 4], tables: &Tables) {
    let [a0, a1, a2, a3] = *col;
    let (m2, m3) = (tables.mul_02, tables.mul_03);
    col[0] = m2.get(a0) ^ m3.get(a1) ^ a2 ^ a3;
    col[1] = a0 ^ m2.get(a1) ^ m3.get(a2) ^ a3;
    col[2] = a0 ^ a1 ^ m2.get(a2) ^ m3.get(a3);
    col[3] = m3.get(a0) ^ a1 ^ a2 ^ m2.get(a3);
}

/// Mixes one column with the inverse `0e 0b 0d 09` circulant matrix.
pub fn inv_mix_single_column(col: &mut [u8; 4], tables: &Tables) {
    let [a0, a1, a2, a3] = *col;
    let (m9, mb, md, me) = (tables.mul_09, tables.mul_0b, tables.mul_0d, tables.mul_0e);
    col[0] = me.get(a0) ^ mb.get(a1) ^ md.get(a2) ^ m9.get(a3);
    col[1] = m9.get(a0) ^ me.get(a1) ^ mb.get(a2) ^ md.get(a3);
    col[2] = md.get(a0) ^ m9.get(a1) ^ me.get(a2) ^ mb.get(a3);
    col[3] = mb.get(a0) ^ md.get(a1) ^ m9.get(a2) ^ me.get(a3);
}

fn for_each_column(state: &mut Block, mut f: impl FnMut(&mut [u8; 4])) {
    for chunk in state.chunks_exact_mut(4) {
        let mut column = [chunk[0], chunk[1], chunk[2], chunk[3]];
        f(&mut column);
        chunk.copy_from_slice(&column);
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block, tables: &Tables) {
    for_each_column(state, |column| mix_single_column(column, tables));
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block, tables: &Tables) {
    for_each_column(state, |column| inv_mix_single_column(column, tables));
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_array(state, round_key);
}
