use rand::Rng;
use std::fmt;
use std::ops::{BitXor, BitXorAssign, Index};

/// A block of bits. This is an alias for [`u64`]
pub type BitBlock = u64;

/// Number of bits in a [`BitBlock`]
pub const BLOCKSIZE: usize = 64;

/// AND with this constant to clear the most significant bit of a block
pub const MSB_OFF: BitBlock = 0x7fffffffffffffff;

/// OR with this constant to set the most significant bit of a block
pub const MSB_ON: BitBlock = 0x8000000000000000;

/// Returns the minimum number of [`BitBlock`]s required to store the given number of bits
#[inline]
pub fn min_blocks(bits: usize) -> usize {
    bits / BLOCKSIZE + if bits % BLOCKSIZE == 0 { 0 } else { 1 }
}

/// A fixed-length vector of bits, stored in 64-bit blocks
///
/// A `Codeword` is a word of a binary linear code: its length is fixed at
/// construction, while individual bits stay mutable. Bits are packed most
/// significant first, and any bits of the final block beyond `len` are kept
/// zero, so equality and the zero test operate block-wise.
///
/// # Examples
///
/// ```
/// use genmat::Codeword;
///
/// let mut w = Codeword::zeros(6);
/// w.set_bit(0, true);
/// w.set_bit(3, true);
/// assert_eq!(w.weight(), 2);
/// assert!(!w.is_zero());
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Codeword {
    len: usize,
    blocks: Vec<BitBlock>,
}

impl Codeword {
    /// Creates a new all-zero `Codeword` of `len` bits
    pub fn zeros(len: usize) -> Self {
        Codeword {
            len,
            blocks: vec![0; min_blocks(len)],
        }
    }

    /// Builds a `Codeword` from a function `f` that determines the value of each bit
    pub fn build(len: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut w = Self::zeros(len);
        for i in 0..len {
            w.set_bit(i, f(i));
        }
        w
    }

    /// Creates a new `Codeword` from a slice of bools
    pub fn from_bool_vec(data: &[bool]) -> Self {
        Self::build(data.len(), |i| data[i])
    }

    /// Creates a new `Codeword` from a slice of integers, where nonzero means 1
    pub fn from_int_vec(data: &[usize]) -> Self {
        Self::build(data.len(), |i| data[i] != 0)
    }

    /// Creates a new random `Codeword` of the given length
    pub fn random(rng: &mut impl Rng, len: usize) -> Self {
        let mut blocks: Vec<BitBlock> = (0..min_blocks(len)).map(|_| rng.random()).collect();
        if let Some(last) = blocks.last_mut() {
            // bits past `len` must stay zero
            *last &= BitBlock::MAX.wrapping_shl((BLOCKSIZE - (len % BLOCKSIZE)) as u32);
        }
        Codeword { len, blocks }
    }

    /// Returns the length of the codeword in bits
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the codeword has length 0
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gets the bit at position `i`
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        assert!(i < self.len, "bit index {} out of range", i);
        let block = self.blocks[i / BLOCKSIZE].rotate_left((i % BLOCKSIZE) as u32);
        block & MSB_ON == MSB_ON
    }

    /// Sets the bit at position `i` to `b`
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn set_bit(&mut self, i: usize, b: bool) {
        assert!(i < self.len, "bit index {} out of range", i);
        let bit_index = (i % BLOCKSIZE) as u32;
        let mut block = self.blocks[i / BLOCKSIZE].rotate_left(bit_index);
        if b {
            block |= MSB_ON;
        } else {
            block &= MSB_OFF;
        }
        self.blocks[i / BLOCKSIZE] = block.rotate_right(bit_index);
    }

    /// Swaps the bits at positions `i` and `j` in place
    ///
    /// # Panics
    ///
    /// Panics if either position is out of range.
    #[inline]
    pub fn swap_bits(&mut self, i: usize, j: usize) {
        let bi = self.bit(i);
        let bj = self.bit(j);
        self.set_bit(i, bj);
        self.set_bit(j, bi);
    }

    /// Checks if the codeword consists of all zero bits
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.blocks.iter().all(|&b| b == 0)
    }

    /// Returns the number of 1s in the codeword (Hamming weight)
    #[inline]
    pub fn weight(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// XORs another `Codeword` into this one, i.e. adds it over GF(2)
    ///
    /// # Panics
    ///
    /// Panics if the two codewords have different lengths.
    #[inline]
    pub fn xor_with(&mut self, other: &Codeword) {
        assert_eq!(
            self.len, other.len,
            "Codewords must have the same length for XOR"
        );
        for (b0, b1) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            *b0 ^= b1;
        }
    }
}

/// Formats the codeword for display
impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.len {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", if self.bit(i) { 1 } else { 0 })?;
        }
        write!(f, "]")
    }
}

/// XOR operation for Codeword
impl BitXor for &Codeword {
    type Output = Codeword;

    fn bitxor(self, rhs: Self) -> Self::Output {
        let mut result = self.clone();
        result.xor_with(rhs);
        result
    }
}

/// XOR operation for owned Codeword
impl BitXor for Codeword {
    type Output = Codeword;

    fn bitxor(mut self, rhs: Self) -> Self::Output {
        self ^= rhs;
        self
    }
}

/// XOR-assign operation for Codeword
impl BitXorAssign<&Codeword> for Codeword {
    fn bitxor_assign(&mut self, rhs: &Codeword) {
        self.xor_with(rhs);
    }
}

/// XOR-assign operation for owned Codeword
impl BitXorAssign<Codeword> for Codeword {
    fn bitxor_assign(&mut self, rhs: Codeword) {
        self.xor_with(&rhs);
    }
}

/// Allows indexing into the codeword to return the bit at `index`
///
/// `w[i]` is equivalent to `w.bit(i)`.
impl Index<usize> for Codeword {
    type Output = bool;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        if self.bit(index) {
            &true
        } else {
            &false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn bit_get_set() {
        let len = 200;
        let bits = vec![0, 3, 63, 64, 100, 199];

        let mut w = Codeword::zeros(len);
        for &b in &bits {
            w.set_bit(b, true);
        }

        for i in 0..len {
            assert_eq!(w.bit(i), bits.contains(&i));
        }
        assert_eq!(w.weight(), bits.len());

        for &b in &bits {
            w.set_bit(b, false);
        }
        assert!(w.is_zero());
    }

    #[test]
    fn self_xor_is_zero() {
        let mut rng = SmallRng::seed_from_u64(1);
        let w = Codeword::random(&mut rng, 300);
        let mut w1 = w.clone();
        w1 ^= &w;
        assert!(w1.is_zero());
        assert_eq!(w1, Codeword::zeros(300));
    }

    #[test]
    fn xor_matches_bitwise() {
        let mut rng = SmallRng::seed_from_u64(2);
        let a = Codeword::random(&mut rng, 130);
        let b = Codeword::random(&mut rng, 130);
        let c = &a ^ &b;
        for i in 0..130 {
            assert_eq!(c.bit(i), a.bit(i) ^ b.bit(i));
        }
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn xor_length_mismatch() {
        let mut a = Codeword::zeros(5);
        let b = Codeword::zeros(6);
        a.xor_with(&b);
    }

    #[test]
    fn swap_bits() {
        let mut w = Codeword::from_int_vec(&[1, 0, 0, 1, 0]);
        w.swap_bits(0, 1);
        assert_eq!(w, Codeword::from_int_vec(&[0, 1, 0, 1, 0]));
        w.swap_bits(3, 3);
        assert_eq!(w, Codeword::from_int_vec(&[0, 1, 0, 1, 0]));
    }

    #[test]
    fn bool_vec_roundtrip() {
        let mut rng = SmallRng::seed_from_u64(3);
        let bools: Vec<bool> = (0..150).map(|_| rng.random()).collect();
        let w = Codeword::from_bool_vec(&bools);
        assert_eq!(w.len(), 150);
        for (i, &b) in bools.iter().enumerate() {
            assert_eq!((i, w[i]), (i, b));
        }
    }

    #[test]
    fn random_pads_with_zeros() {
        // two random words of length 70 must agree on being equal after
        // clearing the 70 logical bits, i.e. the tail of the last block is 0
        let mut rng = SmallRng::seed_from_u64(4);
        let mut a = Codeword::random(&mut rng, 70);
        let mut b = Codeword::random(&mut rng, 70);
        for i in 0..70 {
            a.set_bit(i, false);
            b.set_bit(i, false);
        }
        assert!(a.is_zero());
        assert_eq!(a, b);
    }

    #[test]
    fn display() {
        let w = Codeword::from_int_vec(&[1, 0, 1]);
        assert_eq!(format!("{}", w), "[1, 0, 1]");
    }
}
