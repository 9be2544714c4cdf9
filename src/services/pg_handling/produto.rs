use actix::Handler;
use chrono::Utc;
use diesel::prelude::*;

use crate::services::db_models::{Estoque, Produto};
use crate::services::db_utils::PgActor;
use crate::services::insertable::{NewEstoque, NewProduto};
use crate::services::messages::{CreateProduto, FetchEstoques, FetchProduto, FetchProdutos};
use crate::services::pg_handling::{empresa_por_id, establish_connection};
use crate::services::slug;
use crate::types::ShopError;

fn slug_unico_produto(conn: &mut PgConnection, nome: &str) -> Result<String, ShopError> {
    use crate::schema::produtos::dsl::{produtos, slug as slug_col};

    let base = slug::slugify(nome);
    let ocupado: bool =
        diesel::select(diesel::dsl::exists(produtos.filter(slug_col.eq(&base)))).get_result(conn)?;

    Ok(if ocupado { slug::suffixed(&base, 5) } else { base })
}

impl Handler<FetchProdutos> for PgActor {
    type Result = Result<Vec<Produto>, ShopError>;

    fn handle(&mut self, _msg: FetchProdutos, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::produtos::dsl::{id, produtos};

        let mut conn = establish_connection(&self.0)?;

        Ok(produtos.order(id.asc()).load::<Produto>(&mut conn)?)
    }
}

impl Handler<FetchProduto> for PgActor {
    type Result = Result<Produto, ShopError>;

    fn handle(&mut self, msg: FetchProduto, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::produtos::dsl::{produtos, slug};

        let mut conn = establish_connection(&self.0)?;

        produtos
            .filter(slug.eq(&msg.slug))
            .first::<Produto>(&mut conn)
            .optional()?
            .ok_or_else(|| ShopError::NotFound("Produto não encontrado".into()))
    }
}

impl Handler<CreateProduto> for PgActor {
    type Result = Result<Produto, ShopError>;

    fn handle(&mut self, msg: CreateProduto, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::estoques::dsl::estoques;
        use crate::schema::produtos::dsl::produtos;

        let mut conn = establish_connection(&self.0)?;

        // product and its opening ledger entry land together or not at all
        conn.build_transaction().run(|trx| {
            let empresa = empresa_por_id(trx, msg.empresa_id)?;
            let slug_produto = slug_unico_produto(trx, &msg.nome)?;
            let agora = Utc::now().naive_utc();

            let produto = diesel::insert_into(produtos)
                .values(NewProduto {
                    nome: msg.nome.clone(),
                    descricao: msg.descricao.clone(),
                    custo: msg.custo.clone(),
                    venda: msg.venda.clone(),
                    codigo: msg.codigo.clone(),
                    estoque: msg.estoque,
                    empresa_id: empresa.id,
                    categoria: msg.categoria.clone(),
                    imagem: msg.imagem.clone(),
                    slug: slug_produto,
                    is_available: true,
                    created: agora,
                    updated: agora,
                })
                .get_result::<Produto>(trx)?;

            diesel::insert_into(estoques)
                .values(NewEstoque {
                    empresa_id: empresa.id,
                    produto_id: produto.id,
                    quantidade: produto.estoque,
                    tipo: "entrada".to_owned(),
                    slug: slug::suffixed(&produto.slug, 5),
                    is_available: true,
                    created: agora,
                })
                .execute(trx)?;

            Ok(produto)
        })
    }
}

impl Handler<FetchEstoques> for PgActor {
    type Result = Result<Vec<Estoque>, ShopError>;

    fn handle(&mut self, _msg: FetchEstoques, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::estoques::dsl::{created, estoques};

        let mut conn = establish_connection(&self.0)?;

        Ok(estoques.order(created.desc()).load::<Estoque>(&mut conn)?)
    }
}
