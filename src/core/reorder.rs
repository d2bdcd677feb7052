use ndarray::{ArrayView2, s};

/// Rotate a matrix counter-clockwise by `turns` quarter turns. Returns a view;
/// nothing is copied.
pub fn rotate_ccw(a: ArrayView2<'_, f32>, turns: u8) -> ArrayView2<'_, f32> {
    match turns % 4 {
        0 => a,
        1 => a.slice_move(s![.., ..;-1]).reversed_axes(),
        2 => a.slice_move(s![..;-1, ..;-1]),
        _ => a.slice_move(s![..;-1, ..]).reversed_axes(),
    }
}

/// `yrev` reordering: rotate 270° counter-clockwise, then transpose.
/// The net effect is that row order is reversed and columns are kept.
pub fn yrev(a: ArrayView2<'_, f32>) -> ArrayView2<'_, f32> {
    rotate_ccw(a, 3).reversed_axes()
}
