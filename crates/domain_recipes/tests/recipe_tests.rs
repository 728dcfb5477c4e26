//! Recipe draft and image payload validation tests

use domain_recipes::error::{ImageError, RecipeError};
use domain_recipes::image::ImagePayload;
use domain_recipes::recipe::{IngredientAmount, RecipeDraft};

fn draft_with(ingredients: Vec<IngredientAmount>) -> RecipeDraft {
    RecipeDraft {
        name: "Pancakes".to_string(),
        text: "Mix and fry.".to_string(),
        cooking_time: 20,
        ingredients,
    }
}

mod draft_validation {
    use super::*;

    #[test]
    fn test_valid_draft_passes() {
        let draft = draft_with(vec![
            IngredientAmount { ingredient_id: 1, amount: 500.0 },
            IngredientAmount { ingredient_id: 2, amount: 2.0 },
        ]);

        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_empty_ingredient_list_is_rejected() {
        let draft = draft_with(vec![]);
        assert_eq!(draft.validate(), Err(RecipeError::EmptyIngredients));
    }

    #[test]
    fn test_duplicated_ingredient_is_rejected() {
        let draft = draft_with(vec![
            IngredientAmount { ingredient_id: 7, amount: 1.0 },
            IngredientAmount { ingredient_id: 7, amount: 2.0 },
        ]);

        assert_eq!(draft.validate(), Err(RecipeError::DuplicateIngredient(7)));
    }

    #[test]
    fn test_amount_below_one_is_rejected() {
        let draft = draft_with(vec![IngredientAmount { ingredient_id: 3, amount: 0.5 }]);

        assert_eq!(
            draft.validate(),
            Err(RecipeError::AmountTooSmall { ingredient_id: 3, amount: 0.5 })
        );
    }

    #[test]
    fn test_cooking_time_below_one_is_rejected() {
        let mut draft = draft_with(vec![IngredientAmount { ingredient_id: 1, amount: 1.0 }]);
        draft.cooking_time = 0;

        assert_eq!(draft.validate(), Err(RecipeError::CookingTimeTooShort(0)));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut draft = draft_with(vec![IngredientAmount { ingredient_id: 1, amount: 1.0 }]);
        draft.name = "   ".to_string();

        assert_eq!(draft.validate(), Err(RecipeError::EmptyName));
    }
}

mod image_payloads {
    use super::*;

    // 1x1 transparent PNG
    const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_valid_png_data_url_parses() {
        let payload = ImagePayload::parse(PNG).unwrap();
        assert_eq!(payload.format(), "png");
        assert_eq!(payload.as_data_url(), PNG);
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        assert_eq!(ImagePayload::parse(""), Err(ImageError::Empty));
        assert_eq!(
            ImagePayload::parse("data:image/png;base64,"),
            Err(ImageError::Empty)
        );
    }

    #[test]
    fn test_non_data_url_is_rejected() {
        assert_eq!(
            ImagePayload::parse("https://example.com/cat.png"),
            Err(ImageError::NotADataUrl)
        );
        assert_eq!(
            ImagePayload::parse("data:text/plain;base64,aGVsbG8="),
            Err(ImageError::NotADataUrl)
        );
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        assert_eq!(
            ImagePayload::parse("data:image/tiff;base64,aGVsbG8="),
            Err(ImageError::UnsupportedFormat("tiff".to_string()))
        );
    }

    #[test]
    fn test_broken_base64_is_rejected() {
        assert_eq!(
            ImagePayload::parse("data:image/png;base64,@@@"),
            Err(ImageError::InvalidBase64)
        );
    }
}
