//! # HexMaker CLI Query Maker Integration Tests
//!
//! File: cli/tests/query.rs
//!
mod common;

use common::*;
use predicates::prelude::*;

const DIR: &str = "src/Catalog/Application";

#[test]
fn test_query_with_properties() {
    let project = php_project();

    hexmaker_in(project.path())
        .args(["query", "catalog", "GetStats", "-p", "from:string"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Query 'GetStats' generated successfully"));

    let query = read_generated(project.path(), &format!("{}/GetStats/GetStatsQuery.php", DIR));
    assert!(query.contains("final readonly class GetStatsQuery"));
    assert!(query.contains("public string $from,"));

    let handler = read_generated(
        project.path(),
        &format!("{}/GetStats/GetStatsQueryHandler.php", DIR),
    );
    assert!(handler.contains("public function __invoke(GetStatsQuery $query): GetStatsResponse"));
    assert!(handler.contains("// TODO"));

    let response = read_generated(
        project.path(),
        &format!("{}/GetStats/GetStatsResponse.php", DIR),
    );
    assert!(response.contains("public string $from,"));
}

#[test]
fn test_query_single_entity() {
    let project = php_project();

    hexmaker_in(project.path())
        .args(["query", "catalog", "GetProductQuery", "--entity", "Product"])
        .assert()
        .success();

    let handler = read_generated(
        project.path(),
        &format!("{}/GetProduct/GetProductQueryHandler.php", DIR),
    );
    assert!(handler.contains("use App\\Catalog\\Domain\\Port\\ProductRepositoryInterface;"));
    assert!(handler.contains("$product = $this->productRepository->findById($query->id);"));
    assert!(handler.contains("Product with id \"%s\" not found."));

    let response = read_generated(
        project.path(),
        &format!("{}/GetProduct/GetProductResponse.php", DIR),
    );
    assert!(response.contains("public static function fromEntity(Product $product): self"));
}

#[test]
fn test_query_collection() {
    let project = php_project();

    hexmaker_in(project.path())
        .args([
            "query",
            "catalog",
            "ListProducts",
            "--entity",
            "Product",
            "--collection",
        ])
        .assert()
        .success();

    let handler = read_generated(
        project.path(),
        &format!("{}/ListProducts/ListProductsQueryHandler.php", DIR),
    );
    assert!(handler.contains("ListProductsResponse::fromEntities($this->productRepository->findAll())"));
}

#[test]
fn test_query_dry_run() {
    let project = php_project();

    hexmaker_in(project.path())
        .args(["query", "catalog", "GetProduct", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GetProductResponse.php"));

    assert!(!project.path().join("src").exists());
}
