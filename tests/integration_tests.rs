// Integration tests for Shoe Match

use shoe_match::core::{filter_catalog, Recommender};
use shoe_match::models::{
    BrandPreference, CatalogRecord, GenderLine, RecommendationRequest, ScoringWeights, ShoeSize, Width,
};
use shoe_match::ValidationError;

const BRANDS: [&str; 4] = ["nike", "adidas", "asics", "hoka"];
const MODELS: [&str; 5] = ["air max 90", "air force 1", "dunk low", "gel kayano", "clifton 9"];
const COLORS: [&str; 5] = ["black", "white", "pink", "beige", "navy"];
const GENDERS: [GenderLine; 3] = [GenderLine::Mens, GenderLine::Womens, GenderLine::Unisex];
const WIDTHS: [Option<Width>; 4] = [None, Some(Width::Narrow), Some(Width::Medium), Some(Width::Wide)];

fn create_test_catalog(count: usize) -> Vec<CatalogRecord> {
    (0..count)
        .map(|i| {
            let low = 12 + (i % 6) as u16;
            CatalogRecord {
                id: format!("sku-{:04}", i),
                brand: BRANDS[i % BRANDS.len()].to_string(),
                model: MODELS[(i / 2) % MODELS.len()].to_string(),
                gender_line: GENDERS[i % GENDERS.len()],
                sizes: (low..low + 1 + (i % 5) as u16).map(ShoeSize::from_half_sizes).collect(),
                width: WIDTHS[(i / 3) % WIDTHS.len()],
                colors: vec![
                    COLORS[i % COLORS.len()].to_string(),
                    COLORS[(i + 2) % COLORS.len()].to_string(),
                ],
            }
        })
        .collect()
}

fn create_test_requests() -> Vec<RecommendationRequest> {
    let size = ShoeSize::try_from(8.0).unwrap();
    vec![
        RecommendationRequest::new(GenderLine::Womens, size),
        RecommendationRequest::new(GenderLine::Mens, size).with_width(Width::Wide),
        RecommendationRequest::new(GenderLine::Womens, size)
            .with_width(Width::Medium)
            .with_brand("Nike", BrandPreference::new(["air"], ["air max"]))
            .with_brand("asics", BrandPreference::any_model())
            .with_colors(["pink", "beige", "white"]),
        RecommendationRequest::new(GenderLine::Unisex, ShoeSize::try_from(9.5).unwrap())
            .with_brand("hoka", BrandPreference::new(["clifton", "dunk"], Vec::<&str>::new()))
            .with_colors(["navy"]),
    ]
}

/// Independent statement of the hard constraints
fn satisfies_constraints(record: &CatalogRecord, request: &RecommendationRequest) -> bool {
    let gender_ok = record.gender_line == request.target_gender || record.gender_line == GenderLine::Unisex;
    let size_ok = record.sizes.contains(&request.target_size);
    let width_ok = match (request.target_width, record.width) {
        (Some(target), Some(width)) => target == width,
        _ => true,
    };
    let brand_ok = if request.brand_preferences.is_empty() {
        true
    } else {
        match request.brand_preferences.get(&record.brand) {
            None => false,
            Some(pref) => {
                let model = record.model.to_lowercase();
                let excluded = pref.exclude_models.iter().any(|m| model.contains(m.as_str()));
                let included = pref.include_models.is_empty()
                    || pref.include_models.iter().any(|m| model.contains(m.as_str()));
                !excluded && included
            }
        }
    };
    gender_ok && size_ok && width_ok && brand_ok
}

#[test]
fn test_filter_correctness_over_generated_catalog() {
    let catalog = create_test_catalog(200);

    for request in create_test_requests() {
        let filtered = filter_catalog(&catalog, &request);

        for record in &catalog {
            let kept = filtered.iter().any(|r| r.id == record.id);
            assert_eq!(
                kept,
                satisfies_constraints(record, &request),
                "record {} disagrees with constraints for {:?}",
                record.id,
                request
            );
        }
    }
}

#[test]
fn test_idempotence() {
    let catalog = create_test_catalog(200);
    let recommender = Recommender::with_default_weights();

    for request in create_test_requests() {
        let first = recommender.recommend(&catalog, &request).unwrap();
        let second = recommender.recommend(&catalog, &request).unwrap();

        assert_eq!(first, second);
    }
}

#[test]
fn test_monotonic_ranking() {
    let catalog = create_test_catalog(200);
    let recommender = Recommender::with_default_weights();

    for request in create_test_requests() {
        let results = recommender.recommend(&catalog, &request).unwrap();
        let ranked = results.top(results.len());

        for pair in ranked.windows(2) {
            assert!(
                pair[0].score >= pair[1].score,
                "Results not sorted by score: {} < {}",
                pair[0].score,
                pair[1].score
            );
        }
    }
}

#[test]
fn test_scores_within_range() {
    let catalog = create_test_catalog(200);
    let recommender = Recommender::new(ScoringWeights { brand: 0.7, color: 0.3, brand_only: 0.4 });

    for request in create_test_requests() {
        let results = recommender.recommend(&catalog, &request).unwrap();
        for candidate in results.iter() {
            assert!(
                (0.0..=1.0).contains(&candidate.score),
                "Score {} is out of range [0, 1]",
                candidate.score
            );
        }
    }
}

#[test]
fn test_exclusion_precedence() {
    let catalog = create_test_catalog(200);
    let request = RecommendationRequest::new(GenderLine::Womens, ShoeSize::try_from(8.0).unwrap())
        .with_brand("nike", BrandPreference::new(["dunk low", "air"], ["dunk low"]));

    let results = Recommender::default().recommend(&catalog, &request).unwrap();

    assert!(!results.is_empty());
    assert!(results.iter().all(|c| c.record.model != "dunk low"));
}

#[test]
fn test_top_n_bounds() {
    let catalog = create_test_catalog(200);
    let request = RecommendationRequest::new(GenderLine::Womens, ShoeSize::try_from(8.0).unwrap());
    let results = Recommender::default().recommend(&catalog, &request).unwrap();

    assert!(results.top(0).is_empty());
    for n in [1, 3, 10, results.len(), results.len() + 5] {
        assert_eq!(results.top(n).len(), n.min(results.len()));
    }
}

#[test]
fn test_dunk_low_end_to_end() {
    let catalog = vec![
        CatalogRecord {
            id: "1".to_string(),
            brand: "nike".to_string(),
            model: "dunk low".to_string(),
            gender_line: GenderLine::Womens,
            sizes: [7.0, 7.5, 8.0].iter().map(|s| ShoeSize::try_from(*s).unwrap()).collect(),
            width: Some(Width::Medium),
            colors: vec!["pink".to_string(), "white".to_string()],
        },
        CatalogRecord {
            id: "2".to_string(),
            brand: "nike".to_string(),
            model: "air max".to_string(),
            gender_line: GenderLine::Womens,
            sizes: [ShoeSize::try_from(7.5).unwrap()].into_iter().collect(),
            width: Some(Width::Medium),
            colors: vec!["black".to_string()],
        },
    ];

    let request = RecommendationRequest::new(GenderLine::Womens, ShoeSize::try_from(7.5).unwrap())
        .with_width(Width::Medium)
        .with_brand("nike", BrandPreference::new(["dunk"], ["air max"]))
        .with_colors(["pink", "beige", "white"]);

    let results = Recommender::default().recommend(&catalog, &request).unwrap();
    let top = results.top(5);

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].record.id, "1");
    assert_eq!(top[0].breakdown.color, 1.0);
    assert_eq!(top[0].breakdown.brand, 1.0);
    assert!((top[0].score - 1.0).abs() < 1e-9);
}

#[test]
fn test_neutral_scores_fall_through_to_tie_break() {
    let catalog = create_test_catalog(120);
    let request = RecommendationRequest::new(GenderLine::Womens, ShoeSize::try_from(8.0).unwrap());

    let results = Recommender::default().recommend(&catalog, &request).unwrap();
    let ranked = results.top(results.len());

    assert!(ranked.len() > 1);
    assert!(ranked.iter().all(|c| c.score == 1.0));
    for pair in ranked.windows(2) {
        let a = (pair[0].record.brand.to_lowercase(), &pair[0].record.model, &pair[0].record.id);
        let b = (pair[1].record.brand.to_lowercase(), &pair[1].record.model, &pair[1].record.id);
        assert!(a <= b, "tie-break order violated: {:?} > {:?}", a, b);
    }
}

#[test]
fn test_brand_include_hit_outranks_brand_only() {
    let catalog = create_test_catalog(200);
    let request = RecommendationRequest::new(GenderLine::Womens, ShoeSize::try_from(8.0).unwrap())
        .with_brand("nike", BrandPreference::new(["dunk"], Vec::<&str>::new()))
        .with_brand("adidas", BrandPreference::any_model());

    let results = Recommender::default().recommend(&catalog, &request).unwrap();
    let first_adidas = results
        .iter()
        .position(|c| c.record.brand == "adidas")
        .expect("adidas records should survive filtering");
    let last_nike = results
        .iter()
        .rposition(|c| c.record.brand == "nike")
        .expect("nike dunk records should survive filtering");

    assert!(last_nike < first_adidas, "include-list hits should rank ahead of brand-only matches");
    assert!(results.iter().filter(|c| c.record.brand == "nike").all(|c| c.breakdown.brand == 1.0));
    assert!(results.iter().filter(|c| c.record.brand == "adidas").all(|c| c.breakdown.brand == 0.5));
}

#[test]
fn test_malformed_request_fails_fast() {
    let catalog = create_test_catalog(10);
    let request = RecommendationRequest::new(GenderLine::Mens, ShoeSize::try_from(9.0).unwrap())
        .with_brand("", BrandPreference::any_model());

    assert_eq!(
        Recommender::default().recommend(&catalog, &request).unwrap_err(),
        ValidationError::EmptyBrandKey
    );
}

#[test]
fn test_empty_catalog() {
    let request = RecommendationRequest::new(GenderLine::Mens, ShoeSize::try_from(9.0).unwrap());
    let results = Recommender::default().recommend(&[], &request).unwrap();

    assert!(results.is_empty());
    assert_eq!(results.total_candidates(), 0);
}
