use iconbadge::color_matrix::SaturationMatrix;
use iconbadge::geometry::Size;
use iconbadge::pixel::PixelBuffer;

fn sample_buffer() -> PixelBuffer {
    let mut buffer = PixelBuffer::new(Size::new(4, 2));
    let pixels = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [200, 100, 50, 255],
        [64, 32, 16, 128],
        [10, 10, 10, 10],
        [0, 0, 0, 0],
        [128, 128, 128, 200],
    ];
    for (i, pixel) in pixels.into_iter().enumerate() {
        buffer.put_pixel(i as u32 % 4, i as u32 / 4, pixel);
    }
    buffer
}

#[test]
fn identity_factor_keeps_pixels() {
    let src = sample_buffer();
    let mut dst = PixelBuffer::new(src.size());
    SaturationMatrix::new(1.0).apply(&src, &mut dst);
    assert_eq!(dst, src);
}

#[test]
fn coefficients_are_scaled_and_rounded() {
    let matrix = SaturationMatrix::new(0.0);
    assert_eq!(matrix.divisor(), 256);
    // Luminance weights: 0.0722, 0.7152, 0.2126 of 256.
    assert_eq!(matrix.coefficients()[0], [18, 18, 18, 0]);
    assert_eq!(matrix.coefficients()[1], [183, 183, 183, 0]);
    assert_eq!(matrix.coefficients()[2], [54, 54, 54, 0]);
    assert_eq!(matrix.coefficients()[3], [0, 0, 0, 256]);
}

#[test]
fn alpha_is_untouched_for_any_factor() {
    let src = sample_buffer();
    for factor in [-1.0, 0.0, 0.5, 1.8, 3.0, 10.0] {
        let mut dst = PixelBuffer::new(src.size());
        SaturationMatrix::new(factor).apply(&src, &mut dst);
        for y in 0..src.height() {
            for x in 0..src.width() {
                assert_eq!(
                    dst.pixel(x, y)[3],
                    src.pixel(x, y)[3],
                    "alpha changed at ({x}, {y}) for factor {factor}"
                );
            }
        }
    }
}

#[test]
fn zero_factor_gives_gray() {
    let matrix = SaturationMatrix::new(0.0);
    let [r, g, b, a] = matrix.transform([200, 100, 50, 255]);
    assert_eq!(r, g);
    assert_eq!(g, b);
    assert_eq!(a, 255);
    // 200 * 54 + 100 * 183 + 50 * 18 = 30000, / 256 rounds to 117
    assert_eq!(r, 117);
}

#[test]
fn boost_clamps_to_byte_range() {
    let matrix = SaturationMatrix::new(1.8);
    let [r, g, b, a] = matrix.transform([255, 0, 0, 255]);
    assert_eq!((r, g, b, a), (255, 0, 0, 255));

    let [r, g, b, _] = matrix.transform([0, 0, 255, 255]);
    assert_eq!((r, g, b), (0, 0, 255));
}

#[test]
fn negative_factor_inverts_around_luminance() {
    let matrix = SaturationMatrix::new(-1.0);
    let [r, g, b, _] = matrix.transform([0, 0, 200, 255]);
    // Blue drops out, red and green pick up its luminance share.
    assert_eq!(b, 0);
    assert!(r > 0 && g > 0);
    assert_eq!(r, g);
}

#[test]
fn respects_padded_stride() {
    let size = Size::new(3, 2);
    let mut src = PixelBuffer::with_stride(size, 64);
    src.fill([10, 20, 30, 255]);
    let mut dst = PixelBuffer::with_stride(size, 64);
    SaturationMatrix::new(1.0).apply(&src, &mut dst);
    assert_eq!(dst.stride(), 64);
    assert_eq!(dst.pixel(2, 1), [10, 20, 30, 255]);
}
