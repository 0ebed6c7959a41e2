use recipe_enhancer::enhance::{assemble, mutator, replay};
use recipe_enhancer::{
    apply_modifications, BatchApplier, EnhanceError, MatchingConfig, Modification,
    ModificationValidator, Operation, Recipe, RejectionReason, TargetField,
};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn cake() -> Recipe {
    Recipe::new(
        "cake-1",
        "Simple Cake",
        lines(&["1 cup flour", "2 eggs", "1/2 cup sugar", "1 tsp vanilla"]),
        lines(&[
            "Preheat oven to 350F.",
            "Mix flour and eggs.",
            "Bake for 30 minutes.",
        ]),
    )
}

#[test]
fn test_scenario_fuzzy_replace_is_accepted() {
    let recipe = Recipe::new("r", "Batter", lines(&["1 cup flour", "2 eggs"]), vec![]);
    let modification = Modification::replace(TargetField::Ingredient, "cup of flour", "1.5 cups flour");

    let outcome = BatchApplier::default()
        .apply_batch(&[modification], &recipe)
        .unwrap();

    assert_eq!(outcome.final_recipe.ingredients, vec!["1.5 cups flour", "2 eggs"]);
    assert_eq!(outcome.accepted.len(), 1);
    assert_eq!(outcome.accepted[0].before.as_deref(), Some("1 cup flour"));
    assert!(outcome.rejected.is_empty());
}

#[test]
fn test_replace_targets_described_step_not_short_step() {
    let recipe = Recipe::new(
        "r",
        "Casserole",
        vec![],
        lines(&["Preheat oven to 350F.", "Bake at 350 for 25 minutes.", "Bake."]),
    );
    let modification = Modification::replace(
        TargetField::Instruction,
        "bake at 350 for 20 minutes",
        "Bake at 350 for 20 minutes.",
    );

    let outcome = BatchApplier::default()
        .apply_batch(&[modification], &recipe)
        .unwrap();

    assert_eq!(outcome.accepted.len(), 1);
    assert_eq!(outcome.accepted[0].index, 1);
    assert_eq!(
        outcome.final_recipe.instructions,
        vec!["Preheat oven to 350F.", "Bake at 350 for 20 minutes.", "Bake."]
    );
}

#[test]
fn test_scenario_missing_replacement_is_incomplete() {
    let modification = Modification {
        operation: Operation::Replace,
        target_field: TargetField::Instruction,
        target_text: "bake at 450".to_string(),
        replacement_text: Some(String::new()),
        rationale: None,
    };

    let outcome = BatchApplier::default()
        .apply_batch(&[modification], &cake())
        .unwrap();

    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(
        outcome.rejected[0].rejection_reason,
        Some(RejectionReason::IncompleteFields)
    );
    assert_eq!(outcome.final_recipe, cake());
}

#[test]
fn test_scenario_remove_absent_ingredient_is_not_found() {
    let modification = Modification::remove(TargetField::Ingredient, "chopped walnuts");

    let outcome = BatchApplier::default()
        .apply_batch(&[modification], &cake())
        .unwrap();

    assert!(outcome.accepted.is_empty());
    assert_eq!(
        outcome.rejected[0].rejection_reason,
        Some(RejectionReason::TargetNotFound)
    );
    assert!(outcome.rejected[0].detail.as_deref().unwrap().contains("chopped walnuts"));
}

#[test]
fn test_scenario_later_modification_sees_earlier_addition() {
    let modifications = vec![
        Modification::add(TargetField::Instruction, "Let rest for 10 minutes."),
        Modification::replace(TargetField::Instruction, "Let rest", "Let rest for 15 minutes."),
    ];

    let outcome = BatchApplier::default()
        .apply_batch(&modifications, &cake())
        .unwrap();

    assert_eq!(outcome.accepted.len(), 2);
    assert_eq!(outcome.accepted[1].index, 3);
    assert_eq!(outcome.accepted[1].before.as_deref(), Some("Let rest for 10 minutes."));
    assert_eq!(
        outcome.final_recipe.instructions.last().map(String::as_str),
        Some("Let rest for 15 minutes.")
    );
    assert_eq!(outcome.final_recipe.instructions.len(), 4);
}

#[test]
fn test_order_is_honored() {
    let replace_sugar = Modification::replace(TargetField::Ingredient, "sugar", "1/4 cup honey");
    let remove_sugar = Modification::remove(TargetField::Ingredient, "1/2 cup sugar");
    let applier = BatchApplier::default();

    let forward = applier
        .apply_batch(&[replace_sugar.clone(), remove_sugar.clone()], &cake())
        .unwrap();
    let backward = applier
        .apply_batch(&[remove_sugar, replace_sugar], &cake())
        .unwrap();

    // replacing first leaves nothing for the remove to find
    assert!(forward.final_recipe.ingredients.contains(&"1/4 cup honey".to_string()));
    assert_eq!(forward.rejected.len(), 1);

    assert!(!backward.final_recipe.ingredients.iter().any(|l| l.contains("honey")));
    assert_eq!(backward.rejected.len(), 1);

    assert_ne!(forward.final_recipe, backward.final_recipe);
}

#[test]
fn test_replay_reproduces_final_recipe() {
    let original = cake();
    let modifications = vec![
        Modification::replace(TargetField::Ingredient, "2 eggs", "3 eggs"),
        Modification::remove(TargetField::Ingredient, "vanilla"),
        Modification::remove(TargetField::Ingredient, "chopped walnuts"),
        Modification::add(TargetField::Ingredient, "1 tsp cinnamon"),
        Modification::add(TargetField::Instruction, "Cool in the pan."),
        Modification::replace(TargetField::Instruction, "Bake for 30 minutes", "Bake for 35 minutes."),
        Modification::remove(TargetField::Instruction, "Preheat oven"),
    ];

    let outcome = BatchApplier::default()
        .apply_batch(&modifications, &original)
        .unwrap();
    let replayed = replay(&original, &outcome.accepted).unwrap();

    assert_eq!(replayed, outcome.final_recipe);
    assert_eq!(
        serde_json::to_string(&replayed).unwrap(),
        serde_json::to_string(&outcome.final_recipe).unwrap()
    );
}

#[test]
fn test_every_modification_is_accounted_for() {
    let modifications = vec![
        Modification::replace(TargetField::Ingredient, "flour", "1 cup whole wheat flour"),
        Modification::replace(TargetField::Ingredient, "saffron", "a pinch of saffron"),
        Modification::add(TargetField::Ingredient, ""),
        Modification::remove(TargetField::Instruction, "Mix flour and eggs"),
        Modification::remove(TargetField::Instruction, ""),
        Modification::add(TargetField::Instruction, "Dust with powdered sugar."),
    ];

    let outcome = BatchApplier::default()
        .apply_batch(&modifications, &cake())
        .unwrap();

    assert_eq!(
        outcome.accepted.len() + outcome.rejected.len(),
        modifications.len()
    );
    assert_eq!(outcome.accepted.len(), 3);
    assert!(outcome.rejected.iter().all(|r| !r.accepted));
}

#[test]
fn test_accepted_matches_meet_threshold() {
    let validator = ModificationValidator::default();
    let recipe = cake();
    let candidates = vec![
        Modification::replace(TargetField::Ingredient, "cup of flour", "x"),
        Modification::replace(TargetField::Ingredient, "cups of flower", "x"),
        Modification::replace(TargetField::Ingredient, "sugar half cup", "x"),
        Modification::remove(TargetField::Instruction, "bake thirty minutes"),
        Modification::remove(TargetField::Instruction, "oven preheat 350F"),
    ];

    for modification in &candidates {
        let outcome = validator.validate(modification, &recipe);
        if outcome.accepted {
            let confidence = outcome.match_result.unwrap().confidence;
            assert!(confidence >= 0.80, "{:?} accepted at {}", modification, confidence);
        }
    }
}

#[test]
fn test_validation_is_deterministic() {
    let validator = ModificationValidator::default();
    let recipe = cake();
    let modification = Modification::replace(TargetField::Instruction, "bake 30 minutes", "Bake 25 minutes.");

    let first = validator.validate(&modification, &recipe);
    for _ in 0..20 {
        assert_eq!(validator.validate(&modification, &recipe), first);
    }
}

#[test]
fn test_stricter_threshold_rejects_fuzzy_match() {
    let recipe = Recipe::new("r", "Batter", lines(&["1 cup flour", "2 eggs"]), vec![]);
    let modification = Modification::replace(TargetField::Ingredient, "cup of flour", "1.5 cups flour");

    let strict = BatchApplier::new(&MatchingConfig::new(0.95));
    let outcome = strict.apply_batch(&[modification], &recipe).unwrap();

    assert!(outcome.accepted.is_empty());
    assert_eq!(
        outcome.rejected[0].rejection_reason,
        Some(RejectionReason::TargetNotFound)
    );
}

#[test]
fn test_mutator_never_touches_input() {
    let original = cake();
    let snapshot = original.clone();
    let modification = Modification::add(TargetField::Ingredient, "pinch of salt");

    let (next, _) = mutator::apply(&modification, None, &original).unwrap();

    assert_eq!(original, snapshot);
    assert_eq!(next.ingredients.len(), original.ingredients.len() + 1);
}

#[test]
fn test_enhanced_recipe_attribution() {
    let modifications = vec![
        Modification::replace(TargetField::Ingredient, "2 eggs", "3 eggs").with_rationale("fluffier"),
        Modification::remove(TargetField::Ingredient, "raisins"),
    ];

    let enhanced = apply_modifications(&cake(), &modifications, "review-77").unwrap();

    assert_eq!(enhanced.source_review_id, "review-77");
    assert_eq!(enhanced.accepted_changes.len(), 1);
    assert_eq!(
        enhanced.accepted_changes[0].source_modification.rationale.as_deref(),
        Some("fluffier")
    );
    assert_eq!(enhanced.rejected_changes.len(), 1);
    assert_eq!(enhanced.summary.total_modifications, 2);
    assert_eq!(enhanced.summary.ingredient_changes, 1);
    assert_eq!(enhanced.summary.instruction_changes, 0);

    let json = serde_json::to_value(&enhanced).unwrap();
    assert_eq!(json["rejected_changes"][0]["rejection_reason"], "target_not_found");
    assert_eq!(json["accepted_changes"][0]["operation"], "replace");
}

#[test]
fn test_assemble_requires_review_id() {
    let recipe = cake();
    let outcome = BatchApplier::default().apply_batch(&[], &recipe).unwrap();

    let result = assemble(&recipe, outcome.final_recipe, outcome.accepted, outcome.rejected, "");
    assert!(matches!(result, Err(EnhanceError::MissingReviewId)));

    let direct = apply_modifications(&recipe, &[], " ");
    assert!(matches!(direct, Err(EnhanceError::MissingReviewId)));
}
