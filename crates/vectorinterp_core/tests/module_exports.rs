//! Integration tests for module exports.
//!
//! Verify that public modules and types are reachable via absolute paths
//! and through the crate-root re-exports.

/// Root re-exports cover the everyday API.
#[test]
fn test_root_exports() {
    use vectorinterp_core::{
        AkimaInterpolator, BivariateLinearInterpolator, ExtrapolationMode, InterpolationError,
        LinearInterpolator, NearestInterpolator, Quaternion, SlerpInterpolator,
    };

    let xs = [0.0, 1.0, 2.0, 3.0];
    let ys = [0.0, 1.0, 0.0, 1.0];
    let mode = ExtrapolationMode::Fail;

    assert!(LinearInterpolator::new(&xs, &ys, mode).is_ok());
    assert!(NearestInterpolator::new(&xs, &ys, mode).is_ok());
    assert!(AkimaInterpolator::new(&xs, &ys, mode).is_ok());

    let q = [Quaternion::<f64>::identity(); 2];
    assert!(SlerpInterpolator::new(&xs[..2], &q, mode).is_ok());

    let grid = BivariateLinearInterpolator::<f64>::new(mode);
    assert!(grid.is_empty());

    let err: InterpolationError = LinearInterpolator::new(&xs[..1], &ys[..1], mode).unwrap_err();
    assert!(matches!(err, InterpolationError::InvalidArgument(_)));
}

/// Kernels are usable directly through the generic container.
#[test]
fn test_kernel_module_exports() {
    use vectorinterp_core::kernels::{Akima, Kernel, Linear, Nearest, Slerp};
    use vectorinterp_core::{ExtrapolationMode, Interpolator};

    assert_eq!(<Linear as Kernel<f64>>::NAME, "LinearInterpolator");
    assert_eq!(<Nearest as Kernel<f64>>::NAME, "NearestInterpolator");
    assert_eq!(<Akima<f64> as Kernel<f64>>::NAME, "AkimaInterpolator");
    assert_eq!(<Slerp as Kernel<f64>>::NAME, "SlerpInterpolator");

    let mut interp: Interpolator<f32, Nearest> =
        Interpolator::with_kernel(&[0.0, 2.0], &[0.0, 4.0], ExtrapolationMode::Nearest, Nearest::new(true))
            .unwrap();
    assert_eq!(interp.interpolate(1.0).unwrap(), 2.0);
}

/// Lower-level building blocks stay public.
#[test]
fn test_building_block_exports() {
    use vectorinterp_core::bracket::{Bracket, Location};
    use vectorinterp_core::rotation::{normalize_angles_degrees, quaternion_from_ypr, ypr_from_quaternion};
    use vectorinterp_core::sampling::{compute_downsampling_indices, get_sections, Range};
    use vectorinterp_core::serialization::{version_tag, FORMAT_VERSION};
    use vectorinterp_core::value::approx_eq;

    let xs = [0.0, 1.0, 2.0];
    let mut bracket = Bracket::first(&xs);
    assert_eq!(bracket.locate(&xs, -1.0), Location::Below);

    let q = quaternion_from_ypr([90.0, 0.0, 0.0], true);
    let [yaw, _, _] = ypr_from_quaternion(&q, true);
    assert!(approx_eq(yaw, 90.0, 1e-9));
    assert_eq!(normalize_angles_degrees([-90.0, 0.0, 0.0])[0], 270.0);

    assert_eq!(compute_downsampling_indices(&xs, 2.0, 5.0), vec![0, 2]);
    assert_eq!(get_sections(&xs, 5.0), vec![Range::new(0.0, 2.0)]);

    assert_eq!(FORMAT_VERSION, 1);
    assert_eq!(version_tag("LinearInterpolator"), "LinearInterpolator_V1");
}
