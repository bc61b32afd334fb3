//! Integration tests for Jones calculus calculations.
//!
//! - Reference intensity sequences for QWP and HWP sweeps between crossed
//!   polarizers
//! - Polarizer chains and Malus-type attenuation
//! - Construction errors (dimension, shape, type, operand)
//! - Normalization, normal form and truncation over a grid of inputs
//! - Textual representation and JSON round trips

use approx::{assert_abs_diff_eq, assert_relative_eq};
use num_complex::Complex64;
use serde_json::json;

use jones_core::input::{element_from_value, state_from_value};
use jones_core::polarization::TRUNCATION_EPS;
use jones_core::sweep::{linspace, sweep_angles};
use jones_core::{BuildOptions, JonesError, OpticalElement, Operand, PolarizationState};

// ─────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────

/// Complex amplitudes covering all quadrants, zeros and tiny magnitudes.
fn sample_amplitudes() -> Vec<Complex64> {
    let parts = [-2.5, -1.0, -1e-16, 0.0, 3e-16, 0.3, 1.0, 4.0];
    let mut out = Vec::new();
    for &re in &parts {
        for &im in &parts {
            out.push(Complex64::new(re, im));
        }
    }
    out
}

fn vertical_after(element: OpticalElement) -> f64 {
    OpticalElement::polarizer_vertical()
        .compose(&element)
        .act_on(&PolarizationState::linear_horizontal())
        .intensity()
}

// ─────────────────────────────────────────────────────────────
// Reference sweeps
// ─────────────────────────────────────────────────────────────

#[test]
fn test_quarter_wave_plate_sweep_matches_reference() {
    let expected = [
        0.0, 0.18862862821480014, 0.46986843780162207, 0.41932039290643552,
        0.11326296046939333, 0.013545689574841311, 0.27064483636808295,
        0.49659032585068064, 0.35042385616324229, 0.052714872650901683,
        0.052714872650901523, 0.35042385616324179, 0.49659032585068064,
        0.27064483636808351, 0.013545689574841466, 0.11326296046939295,
        0.41932039290643497, 0.46986843780162302, 0.18862862821480045,
        1.1998078261294861e-31,
    ];
    let angles = linspace(0.0, 360.0, 20);
    for (angle, want) in angles.iter().zip(expected) {
        let got = vertical_after(OpticalElement::quarter_wave_plate(*angle));
        assert_abs_diff_eq!(got, want, epsilon = 1e-12);
    }
}

#[test]
fn test_half_wave_plate_sweep_matches_reference() {
    let expected = [
        0.0, 0.37725725642960045, 0.93973687560324448, 0.83864078581287071,
        0.22652592093878668, 0.027091379149682623, 0.54128967273616557,
        0.99318065170136116, 0.70084771232648502, 0.10542974530180337,
        0.10542974530180307, 0.7008477123264838, 0.99318065170136138,
        0.54128967273616713, 0.027091379149682925, 0.22652592093878596,
        0.83864078581287005, 0.9397368756032457, 0.37725725642960095,
        2.3996156522589722e-31,
    ];
    let angles = linspace(0.0, 360.0, 20);
    for (angle, want) in angles.iter().zip(expected) {
        let got = vertical_after(OpticalElement::half_wave_plate(*angle));
        assert_abs_diff_eq!(got, want, epsilon = 1e-12);
    }
}

#[test]
fn test_sweep_helper_reproduces_quarter_wave_reference_start() {
    let angles = linspace(0.0, 360.0, 20);
    let samples = sweep_angles(&angles, &PolarizationState::linear_horizontal(), |a| {
        OpticalElement::polarizer_vertical().compose(&OpticalElement::quarter_wave_plate(a))
    });
    assert_eq!(samples.len(), 20);
    assert_eq!(samples[0].intensity, 0.0);
    assert_abs_diff_eq!(samples[1].intensity, 0.18862862821480014, epsilon = 1e-12);
    assert_abs_diff_eq!(samples[2].intensity, 0.46986843780162207, epsilon = 1e-12);
    assert!(samples[19].intensity < 1e-30);
}

// ─────────────────────────────────────────────────────────────
// Polarizer chains
// ─────────────────────────────────────────────────────────────

#[test]
fn test_basic_calculation_vertical() {
    let out = OpticalElement::polarizer_vertical()
        .compose(&OpticalElement::polarizer(45.0))
        .act_on(&PolarizationState::linear_horizontal());
    assert_abs_diff_eq!(out.intensity(), 0.25, epsilon = 1e-9);
}

#[test]
fn test_basic_calculation_horizontal() {
    let out = OpticalElement::polarizer_horizontal()
        .compose(&OpticalElement::polarizer(45.0))
        .act_on(&PolarizationState::linear_horizontal());
    assert_abs_diff_eq!(out.intensity(), 0.25, epsilon = 1e-9);
}

#[test]
fn test_apply_chain_through_operands() {
    let chain = OpticalElement::polarizer_vertical()
        .apply(&Operand::from(OpticalElement::polarizer(45.0)))
        .unwrap()
        .into_element()
        .unwrap();
    let out = chain
        .apply(&Operand::from(PolarizationState::linear_horizontal()))
        .unwrap()
        .into_state()
        .unwrap();
    assert_abs_diff_eq!(out.intensity(), 0.25, epsilon = 1e-9);
}

#[test]
fn test_wave_plates_preserve_intensity() {
    let input = PolarizationState::linear(17.0);
    for angle in linspace(0.0, 180.0, 13) {
        for element in [
            OpticalElement::quarter_wave_plate(angle),
            OpticalElement::half_wave_plate(angle),
            OpticalElement::phase_retarder(angle, 63.0),
        ] {
            assert_abs_diff_eq!(element.act_on(&input).intensity(), 1.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_quarter_wave_plate_at_45_turns_horizontal_into_circular() {
    let out = OpticalElement::quarter_wave_plate(45.0).act_on(&PolarizationState::linear_horizontal());
    let s = out.stokes();
    assert_abs_diff_eq!(s.s1, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(s.s2, 0.0, epsilon = 1e-12);
    assert_relative_eq!(s.s3.abs(), 1.0, epsilon = 1e-12);
}

// ─────────────────────────────────────────────────────────────
// Construction errors
// ─────────────────────────────────────────────────────────────

#[test]
fn test_wrong_dimension_input_matrix() {
    let err = element_from_value(&json!([[1, 2], [3, 4], [5, 6]])).unwrap_err();
    assert!(matches!(err, JonesError::InvalidShape { .. }));
    let err = "JonesMatrix([[1+0i, 2+0i], [3+0i, 4+0i], [5+0i, 6+0i]])"
        .parse::<OpticalElement>()
        .unwrap_err();
    assert!(matches!(err, JonesError::InvalidShape { .. }));
}

#[test]
fn test_wrong_type_input_matrix() {
    assert!(matches!(element_from_value(&json!(1)), Err(JonesError::InvalidType(_))));
}

#[test]
fn test_mul_with_number_is_unsupported() {
    let element = OpticalElement::from_real([[1.0, 1.0], [1.0, 1.0]]);
    assert!(matches!(
        element.apply(&Operand::from(5.0)),
        Err(JonesError::UnsupportedOperand(_))
    ));
}

#[test]
fn test_wrong_type_vector() {
    assert!(matches!(
        state_from_value(&json!(3), BuildOptions::STANDARD),
        Err(JonesError::InvalidType(_))
    ));
}

#[test]
fn test_wrong_dimension_vector() {
    assert_eq!(
        state_from_value(&json!([1, 2, 3]), BuildOptions::STANDARD),
        Err(JonesError::InvalidDimension { len: 3 })
    );
}

// ─────────────────────────────────────────────────────────────
// Normalization, normal form, truncation
// ─────────────────────────────────────────────────────────────

#[test]
fn test_normalized_intensity_is_one() {
    let amps = sample_amplitudes();
    for &ex in &amps {
        for &ey in &amps {
            let state = PolarizationState::new(ex, ey);
            if ex.norm_sqr() + ey.norm_sqr() > 0.0 {
                assert_abs_diff_eq!(state.intensity(), 1.0, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_normal_form_has_real_non_negative_ex() {
    let amps = sample_amplitudes();
    for &ex in &amps {
        for &ey in &amps {
            let state = PolarizationState::with_options(
                ex,
                ey,
                BuildOptions { normalize: false, canonical: true },
            );
            assert_eq!(state.ex().im, 0.0, "Im(Ex) for input ({}, {})", ex, ey);
            assert!(state.ex().re >= 0.0, "Re(Ex) for input ({}, {})", ex, ey);
        }
    }
}

#[test]
fn test_truncation_zeroes_tiny_parts() {
    let amps = sample_amplitudes();
    for &ex in &amps {
        for &ey in &amps {
            for options in [BuildOptions::RAW, BuildOptions::STANDARD] {
                let state = PolarizationState::with_options(ex, ey, options);
                for z in state.components() {
                    for part in [z.re, z.im] {
                        assert!(
                            part == 0.0 || part.abs() >= TRUNCATION_EPS,
                            "part {} survived truncation",
                            part
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_named_states_have_unit_intensity() {
    for state in [
        PolarizationState::linear(45.0),
        PolarizationState::linear_horizontal(),
        PolarizationState::linear_vertical(),
        PolarizationState::linear_diagonal(),
        PolarizationState::linear_antidiagonal(),
        PolarizationState::circular_right(),
        PolarizationState::circular_left(),
    ] {
        assert_relative_eq!(state.intensity(), 1.0, epsilon = 1e-12);
    }
}

// ─────────────────────────────────────────────────────────────
// Representation round trips
// ─────────────────────────────────────────────────────────────

#[test]
fn test_repr_vector() {
    let vector = PolarizationState::new(1.0, 1.0);
    let text = vector.to_string();
    let reparsed: PolarizationState = text.parse().unwrap();
    assert_eq!(reparsed.to_string(), text);
}

#[test]
fn test_repr_vector_with_phase() {
    for state in [
        PolarizationState::circular_right(),
        PolarizationState::new(Complex64::new(-0.3, 0.8), Complex64::new(0.1, -2.0)),
        OpticalElement::quarter_wave_plate(33.0).act_on(&PolarizationState::linear(12.0)),
    ] {
        let text = state.to_string();
        assert_eq!(text.parse::<PolarizationState>().unwrap().to_string(), text);
    }
}

#[test]
fn test_repr_matrix() {
    for element in [
        OpticalElement::from_real([[1.0, 1.0], [1.0, 1.0]]),
        OpticalElement::quarter_wave_plate(71.0),
        OpticalElement::phase_retarder(12.0, 200.0),
    ] {
        let text = element.to_string();
        let reparsed: OpticalElement = text.parse().unwrap();
        assert_eq!(reparsed.to_string(), text);
        assert_eq!(reparsed, element);
    }
}

#[test]
fn test_repr_format() {
    assert_eq!(
        PolarizationState::linear_horizontal().to_string(),
        "JonesVector([1+0i, 0+0i])"
    );
    assert_eq!(
        OpticalElement::polarizer_vertical().to_string(),
        "JonesMatrix([[0+0i, 0+0i], [0+0i, 1+0i]])"
    );
}

#[test]
fn test_repr_non_finite_vector() {
    let state = OpticalElement::from_real([[f64::INFINITY, 0.0], [0.0, 1.0]])
        .act_on(&PolarizationState::linear_horizontal());
    let text = state.to_string();
    assert_eq!(text, "JonesVector([inf+NaNi, 0+0i])");
    let reparsed: PolarizationState = text.parse().unwrap();
    assert_eq!(reparsed.to_string(), text);
}

#[test]
fn test_deserialized_state_is_truncated() {
    let state: PolarizationState =
        serde_json::from_str(r#"{"ex":[-3.0,4e-17],"ey":[0.0,2.0]}"#).unwrap();
    assert_eq!(state.ex().im, 0.0);
    assert_eq!(state.ex().re, -3.0);
    assert_eq!(state.ey(), Complex64::new(0.0, 2.0));
}

#[test]
fn test_json_round_trip() {
    let state = PolarizationState::circular_left();
    let json = serde_json::to_string(&state).expect("Serialisation failed");
    let back: PolarizationState = serde_json::from_str(&json).expect("Deserialisation failed");
    assert_eq!(back, state);

    let element = OpticalElement::half_wave_plate(22.5);
    let json = serde_json::to_string(&element).unwrap();
    let back: OpticalElement = serde_json::from_str(&json).unwrap();
    assert_eq!(back, element);
}
