//! Tests for body and sleeve dimensions at the pattern gauge

#[cfg(test)]
mod tests {
    use crate::support::{Fixture, analysis, measurements};
    use knitgen::generation::sizing::{BodyDims, SleeveDims, armhole_depth_cm, even};
    use knitgen::model::garment::{
        ConstructionMethod, FitStyle, GarmentType, NecklineType, SleeveLength, SleeveStyle,
    };

    fn pullover() -> Fixture {
        Fixture::new(&analysis(
            GarmentType::Pullover,
            ConstructionMethod::AssembledPieces,
            NecklineType::Crew,
            SleeveStyle::SetIn,
        ))
    }

    // Tests rounding up to even counts
    // Verified by rounding odd counts down
    #[test]
    fn test_even() {
        assert_eq!(even(11), 12);
        assert_eq!(even(12), 12);
        assert_eq!(even(0), 0);
    }

    // Tests the chest circumference is aligned to the rib repeat with a note
    // Verified by recording the unaligned count
    #[test]
    fn test_body_circumference_rounded_to_repeat() {
        let fixture = pullover();
        let dims = BodyDims::derive(&fixture.ctx()).expect("valid measurements");

        assert_eq!(dims.circumference_sts, 228);
        assert_eq!(dims.hem_circumference_sts, 228);
        assert_eq!(dims.half_sts, 114);
        let step = dims
            .steps
            .iter()
            .find(|step| step.description == "Body circumference at chest")
            .expect("chest step");
        assert_eq!(step.rounded_result, 228);
        assert!(step.rounding_note.is_some());
    }

    // Tests row counts for a 60 cm body at 30 rows per 10 cm
    // Verified by leaving the ribbing out of the lower body
    #[test]
    fn test_body_rows() {
        let fixture = pullover();
        let dims = BodyDims::derive(&fixture.ctx()).expect("valid measurements");

        assert_eq!(dims.hem_rows, 15);
        assert_eq!(dims.total_rows, 180);
        assert_eq!(dims.armhole_rows, 60);
        assert_eq!(dims.lower_rows, 105);
        assert_eq!(dims.underarm_sts, 12);
        assert_eq!(dims.section_sts(), 102);
        assert_eq!(dims.band_sts % 2, 0);
    }

    // Tests fitted garments size the hem from the hip
    // Verified by always using the chest for the hem
    #[test]
    fn test_fitted_hem_uses_hip() {
        let mut analysis = analysis(
            GarmentType::Pullover,
            ConstructionMethod::AssembledPieces,
            NecklineType::Crew,
            SleeveStyle::SetIn,
        );
        analysis.fit_style = FitStyle::Fitted;
        let fixture = Fixture::new(&analysis);
        let dims = BodyDims::derive(&fixture.ctx()).expect("valid measurements");

        assert!(dims.hem_circumference_sts > dims.circumference_sts);
        assert_eq!(dims.hem_circumference_sts % 4, 0);
    }

    // Tests armhole depth for fit and sleeve style
    // Verified by removing the oversized allowance
    #[test]
    fn test_armhole_depth() {
        let fixture = pullover();
        let depth = armhole_depth_cm(&fixture.ctx()).expect("valid measurements");
        assert!((depth - 20.0).abs() < 1e-9);

        let mut oversized = analysis(
            GarmentType::Pullover,
            ConstructionMethod::AssembledPieces,
            NecklineType::Crew,
            SleeveStyle::DropShoulder,
        );
        oversized.fit_style = FitStyle::Oversized;
        let fixture = Fixture::new(&oversized);
        let depth = armhole_depth_cm(&fixture.ctx()).expect("valid measurements");
        assert!((depth - 24.0).abs() < 1e-9);
    }

    // Tests a non-finite body measurement fails derivation
    // Verified by skipping the finiteness check
    #[test]
    fn test_body_rejects_non_finite() {
        let mut m = measurements();
        m.body_length = f64::NAN;
        let fixture = pullover().with_measurements(m);

        assert!(BodyDims::derive(&fixture.ctx()).is_err());
    }

    // Tests long sleeve dimensions
    // Verified by dropping the cuff ease
    #[test]
    fn test_sleeve_dims() {
        let fixture = pullover();
        let sleeve = SleeveDims::derive(&fixture.ctx()).expect("valid measurements");

        assert_eq!(sleeve.cuff_flat_sts, 42);
        assert_eq!(sleeve.cuff_round_sts, 40);
        assert_eq!(sleeve.upper_sts, 76);
        assert_eq!((sleeve.upper_sts - sleeve.cuff_flat_sts) % 2, 0);
        assert!(!sleeve.reversed);
        assert!(sleeve.taper_rows > 0);
        assert_eq!(sleeve.cap_top_sts % 2, 0);
        assert_eq!(sleeve.raglan_top_sts, 8);
    }

    // Tests a wrist wider than the upper arm is flagged as reversed
    // Verified by clamping the cuff to the upper arm silently
    #[test]
    fn test_sleeve_reversed_taper() {
        let mut m = measurements();
        m.wrist_circumference = 40.0;
        let fixture = pullover().with_measurements(m);
        let sleeve = SleeveDims::derive(&fixture.ctx()).expect("valid measurements");

        assert!(sleeve.reversed);
        assert!(sleeve.upper_sts >= sleeve.cuff_flat_sts);
    }

    // Tests shorter sleeves need fewer rows
    // Verified by ignoring the sleeve length
    #[test]
    fn test_short_sleeve_is_shorter() {
        let long = pullover();
        let mut short_analysis = analysis(
            GarmentType::Pullover,
            ConstructionMethod::AssembledPieces,
            NecklineType::Crew,
            SleeveStyle::SetIn,
        );
        short_analysis.sleeve_length = SleeveLength::Short;
        let short = Fixture::new(&short_analysis);

        let long = SleeveDims::derive(&long.ctx()).expect("valid measurements");
        let short = SleeveDims::derive(&short.ctx()).expect("valid measurements");
        assert!(short.taper_rows + short.straight_rows < long.taper_rows + long.straight_rows);
    }

    // Tests a non-finite arm measurement fails the sleeve only
    // Verified by checking arm length in the body dimensions
    #[test]
    fn test_sleeve_rejects_non_finite_arm() {
        let mut m = measurements();
        m.arm_length = f64::INFINITY;
        let fixture = pullover().with_measurements(m);

        assert!(SleeveDims::derive(&fixture.ctx()).is_err());
        assert!(BodyDims::derive(&fixture.ctx()).is_ok());
    }
}
