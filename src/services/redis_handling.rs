use crate::types::{CATALOGO_KEY, CATALOGO_TTL_S};

/// Cached JSON of the product catalog, if a fresh copy exists.
pub fn get_catalogo(db: &redis::Client) -> Result<Option<String>, String> {
    let mut conn = match db.get_connection() {
        Ok(conn) => conn,
        Err(_) => return Err("Failed to establish connection with redis".into()),
    };

    match redis::cmd("GET").arg(CATALOGO_KEY).query::<Option<String>>(&mut conn) {
        Ok(cached) => Ok(cached),
        Err(_) => Err("Failed to get catalog JSON from redis db".into()),
    }
}

pub fn put_catalogo(db: &redis::Client, catalogo_json: &str) -> Result<(), String> {
    let mut conn = match db.get_connection() {
        Ok(conn) => conn,
        Err(_) => return Err("Failed to establish connection with redis".into()),
    };

    redis::cmd("SET")
        .arg(CATALOGO_KEY)
        .arg(catalogo_json)
        .arg("EX")
        .arg(CATALOGO_TTL_S)
        .execute(&mut conn);

    Ok(())
}

/// Dropped whenever a product is created so the next listing rebuilds it.
pub fn invalidate_catalogo(db: &redis::Client) -> Result<(), String> {
    let mut conn = match db.get_connection() {
        Ok(conn) => conn,
        Err(_) => return Err("Failed to establish connection with redis".into()),
    };

    redis::cmd("DEL").arg(CATALOGO_KEY).execute(&mut conn);

    Ok(())
}
