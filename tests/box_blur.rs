use iconbadge::box_blur::{blur, box_convolve, kernel_diameter};
use iconbadge::geometry::Size;
use iconbadge::pixel::PixelBuffer;

#[test]
fn kernel_diameter_is_always_odd() {
    let mut radius = 0.01;
    while radius < 200.0 {
        let d = kernel_diameter(radius);
        assert_eq!(d % 2, 1, "radius {radius} gave even diameter {d}");
        radius += 0.37;
    }
}

#[test]
fn kernel_diameter_follows_svg_formula() {
    // 10 * 3 * sqrt(2 pi) / 4 + 0.5 = 19.3 -> 19
    assert_eq!(kernel_diameter(10.0), 19);
    // 20 -> 38.1 -> 38 -> forced odd
    assert_eq!(kernel_diameter(20.0), 39);
    // 12.8 (10% of a 128 px icon) -> 24.56 -> 24 -> 25
    assert_eq!(kernel_diameter(12.8), 25);
}

#[test]
fn uniform_buffer_is_a_fixed_point() {
    let size = Size::new(17, 9);
    let mut input = PixelBuffer::new(size);
    input.fill([12, 80, 200, 255]);
    let expected = input.clone();
    let mut output = PixelBuffer::new(size);

    assert!(blur(&mut input, &mut output, 12.0));
    assert_eq!(output, expected);
}

#[test]
fn tiny_radius_is_a_no_op() {
    let size = Size::new(4, 4);
    let mut input = PixelBuffer::new(size);
    input.put_pixel(1, 1, [255, 255, 255, 255]);
    let before = input.clone();
    let mut output = PixelBuffer::new(size);

    assert!(!blur(&mut input, &mut output, 0.0));
    assert_eq!(input, before);
    assert_eq!(output, PixelBuffer::new(size));
}

#[test]
fn single_box_averages_neighbourhood() {
    let size = Size::new(3, 3);
    let mut src = PixelBuffer::new(size);
    src.put_pixel(1, 1, [90, 90, 90, 90]);
    let mut dst = PixelBuffer::new(size);

    box_convolve(&src, &mut dst, 3);
    // Every 3x3 window around every pixel still sees the center once.
    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(dst.pixel(x, y), [10, 10, 10, 10]);
        }
    }
}

#[test]
fn edges_extend_instead_of_darkening() {
    let size = Size::new(5, 1);
    let mut src = PixelBuffer::new(size);
    src.fill([255, 255, 255, 255]);
    let mut dst = PixelBuffer::new(size);

    box_convolve(&src, &mut dst, 5);
    // Zero padding would pull the corners towards transparent.
    assert_eq!(dst.pixel(0, 0), [255, 255, 255, 255]);
    assert_eq!(dst.pixel(4, 0), [255, 255, 255, 255]);
}

#[test]
fn kernel_wider_than_image() {
    let size = Size::new(2, 1);
    let mut src = PixelBuffer::new(size);
    src.put_pixel(0, 0, [0, 0, 0, 255]);
    src.put_pixel(1, 0, [200, 200, 200, 255]);
    let mut dst = PixelBuffer::new(size);

    box_convolve(&src, &mut dst, 7);
    let left = dst.pixel(0, 0);
    let right = dst.pixel(1, 0);
    assert!(left[0] < right[0]);
    assert_eq!(left[3], 255);
    assert_eq!(right[3], 255);
}

#[test]
fn blur_spreads_a_point() {
    let size = Size::new(21, 21);
    let mut input = PixelBuffer::new(size);
    input.put_pixel(10, 10, [255, 255, 255, 255]);
    let mut output = PixelBuffer::new(size);

    blur(&mut input, &mut output, 2.0);
    let center = output.pixel(10, 10);
    let near = output.pixel(11, 10);
    assert!(center[3] < 255);
    assert!(near[3] > 0);
    assert!(center[3] >= near[3]);
}

#[test]
fn huge_kernel_does_not_overflow_the_sums() {
    // 4105 * 4105 * 255 is just past u32::MAX.
    let size = Size::new(2, 1);
    let mut src = PixelBuffer::new(size);
    src.fill([255, 255, 255, 255]);
    let mut dst = PixelBuffer::new(size);

    box_convolve(&src, &mut dst, 4105);
    assert_eq!(dst.pixel(0, 0), [255, 255, 255, 255]);
    assert_eq!(dst.pixel(1, 0), [255, 255, 255, 255]);
}
