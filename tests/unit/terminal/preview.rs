use super::*;
use crate::foundation::core::Canvas;

#[test]
fn cells_fit_the_terminal_and_keep_aspect() {
    let frame = FrameBuffer::new(Canvas::new(64, 32).unwrap());
    // 8 rows hold 16 pixel rows, so height limits the scale to 0.5.
    let cells = half_block_cells(&frame, 80, 8);
    assert_eq!(cells.len(), 8);
    assert!(cells.iter().all(|row| row.len() == 32));
}

#[test]
fn top_and_bottom_halves_sample_separate_rows() {
    let canvas = Canvas::new(2, 2).unwrap();
    let mut data = vec![0u8; 12];
    data[..6].copy_from_slice(&[255, 0, 0, 255, 0, 0]);
    data[6..].copy_from_slice(&[0, 0, 255, 0, 0, 255]);
    let frame = FrameBuffer::from_raw(canvas.width, canvas.height, data).unwrap();

    let cells = half_block_cells(&frame, 2, 1);
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].len(), 2);
    assert_eq!(cells[0][0], (Rgb8::new(255, 0, 0), Rgb8::new(0, 0, 255)));
}

#[test]
fn tiny_terminals_yield_nothing() {
    let frame = FrameBuffer::new(Canvas::new(100, 100).unwrap());
    assert!(half_block_cells(&frame, 0, 10).is_empty());
    assert!(half_block_cells(&frame, 10, 0).is_empty());
}
