//! Owned N-dimensional pixel buffer in row-major layout with axis 0
//! contiguous (`stride_0 == 1`, `stride_k == stride_{k-1} * size_{k-1}`).
//!
//! The buffer carries a per-axis spacing so that distance computations can
//! work in physical coordinates. Pixels are generic and opaque: the type is
//! only required to be `Copy`.

/// Dense N-dimensional image over the index rectangle
/// `[0, size_0) × … × [0, size_{N-1})`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageNd<T> {
    shape: Vec<usize>,
    strides: Vec<usize>,
    spacing: Vec<f64>,
    data: Vec<T>,
}

impl<T: Copy> ImageNd<T> {
    /// Construct a buffer of the given shape with every pixel set to `value`.
    /// Spacing defaults to 1 along every axis.
    pub fn filled(shape: &[usize], value: T) -> Self {
        let strides = compute_strides(shape);
        let len = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            strides,
            spacing: vec![1.0; shape.len()],
            data: vec![value; len],
        }
    }

    /// Construct a buffer by evaluating `f` at every index, in linear order.
    pub fn from_fn(shape: &[usize], mut f: impl FnMut(&[usize]) -> T) -> Self {
        let strides = compute_strides(shape);
        let len: usize = shape.iter().product();
        let mut data = Vec::with_capacity(len);
        let mut index = vec![0usize; shape.len()];
        for _ in 0..len {
            data.push(f(&index));
            advance_index(shape, &mut index);
        }
        Self {
            shape: shape.to_vec(),
            strides,
            spacing: vec![1.0; shape.len()],
            data,
        }
    }

    /// Wrap an existing linear buffer. `data.len()` must equal the product
    /// of the extents.
    pub fn from_raw(shape: &[usize], data: Vec<T>) -> Self {
        let len: usize = shape.iter().product();
        assert_eq!(
            data.len(),
            len,
            "buffer length {} does not match shape {:?}",
            data.len(),
            shape
        );
        Self {
            shape: shape.to_vec(),
            strides: compute_strides(shape),
            spacing: vec![1.0; shape.len()],
            data,
        }
    }

    /// Replace the per-axis spacing. Panics if the length disagrees with the
    /// dimensionality; values are validated by the transform front end.
    pub fn with_spacing(mut self, spacing: &[f64]) -> Self {
        assert_eq!(
            spacing.len(),
            self.shape.len(),
            "spacing has {} entries for a {}-dimensional image",
            spacing.len(),
            self.shape.len()
        );
        self.spacing = spacing.to_vec();
        self
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Convert an N-dimensional index to a linear offset into `data`.
    #[inline]
    pub fn offset(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.shape.len());
        index
            .iter()
            .zip(&self.strides)
            .map(|(i, s)| i * s)
            .sum()
    }

    /// Get the pixel at an N-dimensional index.
    #[inline]
    pub fn get(&self, index: &[usize]) -> T {
        self.data[self.offset(index)]
    }

    /// Set the pixel at an N-dimensional index.
    #[inline]
    pub fn set(&mut self, index: &[usize], value: T) {
        let off = self.offset(index);
        self.data[off] = value;
    }

    /// Backing storage in linear order.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Apply a pointwise function, keeping shape and spacing.
    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> ImageNd<U> {
        ImageNd {
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            spacing: self.spacing.clone(),
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Iterate over all N-dimensional indices in linear order.
    pub fn indices(&self) -> IndexIter {
        IndexIter::new(&self.shape)
    }
}

fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(shape.len());
    let mut acc = 1usize;
    for &extent in shape {
        strides.push(acc);
        acc *= extent;
    }
    strides
}

/// Odometer-style advance of an index vector; axis 0 varies fastest.
fn advance_index(shape: &[usize], index: &mut [usize]) {
    for (i, &extent) in index.iter_mut().zip(shape) {
        *i += 1;
        if *i < extent {
            return;
        }
        *i = 0;
    }
}

/// Iterator over the indices of an index rectangle, axis 0 fastest.
pub struct IndexIter {
    shape: Vec<usize>,
    current: Vec<usize>,
    remaining: usize,
}

impl IndexIter {
    fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            current: vec![0; shape.len()],
            remaining: shape.iter().product(),
        }
    }
}

impl Iterator for IndexIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.remaining == 0 {
            return None;
        }
        let out = self.current.clone();
        advance_index(&self.shape, &mut self.current);
        self.remaining -= 1;
        Some(out)
    }
}
