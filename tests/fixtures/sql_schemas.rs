/// Fixture: SQL DDL inputs

pub const USERS: &str = "CREATE TABLE users (id UUID PRIMARY KEY, email VARCHAR NOT NULL);";

pub const SHOP: &str = r#"
-- Catalogue
CREATE TABLE IF NOT EXISTS public.categories (
    id SERIAL PRIMARY KEY,
    name VARCHAR(120) NOT NULL,
    description TEXT
);

CREATE TABLE products (
    sku VARCHAR(32),
    id UUID,
    title VARCHAR(255) NOT NULL,
    price NUMERIC(10, 2) NOT NULL,
    in_stock BOOLEAN,
    created_at TIMESTAMP WITH TIME ZONE,
    CONSTRAINT products_pk PRIMARY KEY (sku, id)
);

CREATE INDEX products_title_idx ON products (title);

/* orders reference products by id */
CREATE TABLE orders (
    id BIGINT NOT NULL,
    placed_on DATE,
    total DECIMAL(12, 2),
    PRIMARY KEY (id)
);
"#;

pub const NO_PRIMARY_KEY: &str = r#"
CREATE TABLE audit_entries (
    message TEXT,
    logged_at TIMESTAMP
);
"#;

pub const UNKNOWN_TYPE: &str = "CREATE TABLE shapes (id INTEGER PRIMARY KEY, outline GEOMETRY);";

pub const EMPTY_TABLE: &str = "CREATE TABLE nothing ();";

pub const MALFORMED: &str = "CREATE TABLE users (id UUID PRIMARY KEY, email VARCHAR";
