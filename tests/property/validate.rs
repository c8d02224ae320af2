use crate::helpers::text_field;
use attrform::error::ValidationErrorKind;
use attrform::validate::validate_fields;
use attrform::FormData;
use proptest::prelude::*;

fn length_errors(result: &attrform::ValidationResult) -> usize {
    result
        .errors
        .iter()
        .filter(|e| {
            matches!(
                e.kind,
                ValidationErrorKind::TooShort | ValidationErrorKind::TooLong
            )
        })
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // A value that satisfies the minimum keeps satisfying it as it grows.
    #[test]
    fn growing_a_long_enough_value_never_adds_too_short(
        base in "[a-z]{5,20}",
        suffix in "[a-z]{0,10}",
    ) {
        let mut field = text_field("Message", "message");
        field.min_length = Some(5);

        let grown = format!("{}{}", base, suffix);
        let before = validate_fields(
            std::slice::from_ref(&field),
            &FormData::from_pairs([("message", base)]),
        );
        let after = validate_fields(&[field], &FormData::from_pairs([("message", grown)]));

        prop_assert!(before.is_valid());
        prop_assert!(!after.errors.iter().any(|e| e.kind == ValidationErrorKind::TooShort));
    }

    // Below the minimum there is exactly one too-short error, no matter
    // how far below.
    #[test]
    fn short_values_get_exactly_one_too_short(value in "[a-z]{0,4}") {
        let mut field = text_field("Message", "message");
        field.min_length = Some(5);

        let result = validate_fields(&[field], &FormData::from_pairs([("message", value)]));
        let too_short = result
            .errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::TooShort)
            .count();
        prop_assert_eq!(too_short, 1);
    }

    // Values inside the bounds never produce length errors.
    #[test]
    fn values_within_bounds_are_length_clean(value in "[a-z]{3,8}") {
        let mut field = text_field("Message", "message");
        field.min_length = Some(3);
        field.max_length = Some(8);

        let result = validate_fields(&[field], &FormData::from_pairs([("message", value)]));
        prop_assert_eq!(length_errors(&result), 0);
    }

    // The required rule sees only emptiness; content never matters.
    #[test]
    fn required_depends_only_on_emptiness(value in "[a-z0-9 ]{1,20}") {
        let mut field = text_field("Name", "name");
        field.is_required = true;

        let filled = validate_fields(
            std::slice::from_ref(&field),
            &FormData::from_pairs([("name", value)]),
        );
        prop_assert!(!filled.errors.iter().any(|e| e.kind == ValidationErrorKind::Required));

        let empty = validate_fields(&[field], &FormData::new());
        prop_assert!(empty.errors.iter().any(|e| e.kind == ValidationErrorKind::Required));
    }
}
