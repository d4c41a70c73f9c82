//! Diesel table definitions; must match `backend/migrations`.

diesel::table! {
    /// Seller accounts. `email` carries a unique index.
    vendedores (id) {
        id -> Int8,
        nome -> Varchar,
        email -> Varchar,
        /// Tagged credential, e.g. `{noop}123` or `{bcrypt}$2b$...`.
        senha -> Varchar,
        /// `ADMIN` or `VENDEDOR`.
        role -> Varchar,
    }
}

diesel::table! {
    /// Travel packages. Ticket and lodging details are owned by the row and
    /// stored as JSONB documents.
    pacotes (id) {
        id -> Int8,
        titulo -> Nullable<Varchar>,
        descricao -> Nullable<Text>,
        preco_base -> Nullable<Float8>,
        imagem_url -> Nullable<Varchar>,
        passagem -> Nullable<Jsonb>,
        hospedagem -> Nullable<Jsonb>,
    }
}
