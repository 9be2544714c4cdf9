use actix::Handler;
use chrono::Utc;
use diesel::prelude::*;

use crate::services::db_models::{Carrinho, CarrinhoDetalhe, ItemCarrinho};
use crate::services::db_utils::PgActor;
use crate::services::insertable::{CarrinhoChangeset, NewCarrinho, NewItemCarrinho};
use crate::services::messages::{
    AddItemToCarrinho, CancelCarrinho, CreateCarrinho, DeleteCarrinho, FetchCarrinho,
    FetchCarrinhos, RemoveItemFromCarrinho, UpdateCarrinho, UpdateItemCarrinho,
};
use crate::services::pg_handling::{
    carrinho_por_slug, detalhe_carrinho, devolver_estoque, establish_connection, produto_por_id,
    reservar_estoque,
};
use crate::services::slug;
use crate::types::ShopError;

impl Handler<FetchCarrinhos> for PgActor {
    type Result = Result<Vec<CarrinhoDetalhe>, ShopError>;

    fn handle(&mut self, msg: FetchCarrinhos, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::carrinhos::dsl::{carrinhos, sessao_id, usuario_id};

        let mut conn = establish_connection(&self.0)?;

        let mut query = carrinhos.into_boxed();
        if let Some(uid) = msg.usuario_id {
            query = query.filter(usuario_id.eq(uid));
        }
        if let Some(sid) = msg.sessao_id {
            query = query.filter(sessao_id.eq(sid));
        }

        let encontrados = query.load::<Carrinho>(&mut conn)?;
        encontrados
            .into_iter()
            .map(|carrinho| detalhe_carrinho(&mut conn, carrinho))
            .collect()
    }
}

impl Handler<CreateCarrinho> for PgActor {
    type Result = Result<CarrinhoDetalhe, ShopError>;

    fn handle(&mut self, msg: CreateCarrinho, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::carrinhos::dsl::carrinhos;

        let mut conn = establish_connection(&self.0)?;

        let agora = Utc::now().naive_utc();
        let criado = diesel::insert_into(carrinhos)
            .values(NewCarrinho {
                usuario_id: msg.usuario_id,
                sessao_id: msg.sessao_id,
                slug: slug::suffixed("carrinho", 8),
                criado_em: agora,
                atualizado_em: agora,
            })
            .get_result::<Carrinho>(&mut conn)?;

        Ok(CarrinhoDetalhe::new(criado, vec![]))
    }
}

impl Handler<FetchCarrinho> for PgActor {
    type Result = Result<CarrinhoDetalhe, ShopError>;

    fn handle(&mut self, msg: FetchCarrinho, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        let carrinho = carrinho_por_slug(&mut conn, &msg.slug)?;
        detalhe_carrinho(&mut conn, carrinho)
    }
}

impl Handler<UpdateCarrinho> for PgActor {
    type Result = Result<CarrinhoDetalhe, ShopError>;

    fn handle(&mut self, msg: UpdateCarrinho, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::carrinhos::dsl::carrinhos;

        let mut conn = establish_connection(&self.0)?;

        let carrinho = carrinho_por_slug(&mut conn, &msg.slug)?;
        let atualizado = diesel::update(carrinhos.find(carrinho.id))
            .set(&CarrinhoChangeset {
                usuario_id: msg.usuario_id,
                sessao_id: msg.sessao_id,
                atualizado_em: Utc::now().naive_utc(),
            })
            .get_result::<Carrinho>(&mut conn)?;

        detalhe_carrinho(&mut conn, atualizado)
    }
}

impl Handler<DeleteCarrinho> for PgActor {
    type Result = Result<(), ShopError>;

    fn handle(&mut self, msg: DeleteCarrinho, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::carrinhos::dsl::carrinhos;
        use crate::schema::itens_carrinho::dsl::{carrinho_id, itens_carrinho};

        let mut conn = establish_connection(&self.0)?;

        conn.build_transaction().run(|trx| {
            let carrinho = carrinho_por_slug(trx, &msg.slug)?;

            diesel::delete(itens_carrinho.filter(carrinho_id.eq(carrinho.id))).execute(trx)?;
            diesel::delete(carrinhos.find(carrinho.id)).execute(trx)?;

            Ok(())
        })
    }
}

impl Handler<AddItemToCarrinho> for PgActor {
    type Result = Result<CarrinhoDetalhe, ShopError>;

    fn handle(&mut self, msg: AddItemToCarrinho, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::itens_carrinho::dsl::{
            carrinho_id, empresa_id, itens_carrinho, produto_id, quantidade,
        };

        let mut conn = establish_connection(&self.0)?;

        conn.build_transaction().run(|trx| {
            let carrinho = carrinho_por_slug(trx, &msg.carrinho_slug)?;
            let produto = produto_por_id(trx, msg.produto_id)?;

            reservar_estoque(trx, produto.id, msg.quantidade)?;

            let existente = itens_carrinho
                .filter(carrinho_id.eq(carrinho.id))
                .filter(produto_id.eq(produto.id))
                .filter(empresa_id.is_not_distinct_from(msg.empresa_id.clone()))
                .first::<ItemCarrinho>(trx)
                .optional()?;

            match existente {
                Some(item) => {
                    // the first-add price sticks, only the quantity grows
                    diesel::update(itens_carrinho.find(item.id))
                        .set(quantidade.eq(quantidade + msg.quantidade))
                        .execute(trx)?;
                    log::debug!("quantidade do item {} atualizada", item.slug);
                }
                None => {
                    let item_slug =
                        slug::suffixed(&format!("item-{}", slug::slugify(&produto.nome)), 8);
                    diesel::insert_into(itens_carrinho)
                        .values(NewItemCarrinho {
                            carrinho_id: carrinho.id,
                            produto_id: produto.id,
                            quantidade: msg.quantidade,
                            preco_unitario: produto.preco_vigente(),
                            empresa_id: msg.empresa_id.clone(),
                            slug: item_slug,
                            produto_slug: msg
                                .produto_slug
                                .clone()
                                .unwrap_or_else(|| produto.slug.clone()),
                        })
                        .execute(trx)?;
                    log::debug!("novo item {} adicionado ao carrinho {}", produto.slug, carrinho.slug);
                }
            }

            detalhe_carrinho(trx, carrinho)
        })
    }
}

impl Handler<UpdateItemCarrinho> for PgActor {
    type Result = Result<CarrinhoDetalhe, ShopError>;

    fn handle(&mut self, msg: UpdateItemCarrinho, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::itens_carrinho::dsl::{carrinho_id, itens_carrinho, quantidade, slug};

        let mut conn = establish_connection(&self.0)?;

        conn.build_transaction().run(|trx| {
            let carrinho = carrinho_por_slug(trx, &msg.carrinho_slug)?;

            let item = itens_carrinho
                .filter(carrinho_id.eq(carrinho.id))
                .filter(slug.eq(&msg.item_slug))
                .first::<ItemCarrinho>(trx)
                .optional()?
                .ok_or_else(|| ShopError::NotFound("Item não encontrado".into()))?;

            if msg.quantidade <= 0 {
                diesel::delete(itens_carrinho.find(item.id)).execute(trx)?;
                devolver_estoque(trx, item.produto_id, item.quantidade)?;
            } else {
                let delta = msg.quantidade - item.quantidade;
                if delta > 0 {
                    reservar_estoque(trx, item.produto_id, delta)?;
                } else if delta < 0 {
                    devolver_estoque(trx, item.produto_id, -delta)?;
                }
                diesel::update(itens_carrinho.find(item.id))
                    .set(quantidade.eq(msg.quantidade))
                    .execute(trx)?;
            }

            detalhe_carrinho(trx, carrinho)
        })
    }
}

impl Handler<RemoveItemFromCarrinho> for PgActor {
    type Result = Result<CarrinhoDetalhe, ShopError>;

    fn handle(&mut self, msg: RemoveItemFromCarrinho, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::itens_carrinho::dsl::{carrinho_id, itens_carrinho, produto_slug};

        let mut conn = establish_connection(&self.0)?;

        conn.build_transaction().run(|trx| {
            let carrinho = carrinho_por_slug(trx, &msg.carrinho_slug)?;

            // items are addressed by the product slug on this endpoint,
            // that is the wire contract the frontend relies on
            let item = itens_carrinho
                .filter(carrinho_id.eq(carrinho.id))
                .filter(produto_slug.eq(&msg.produto_slug))
                .first::<ItemCarrinho>(trx)
                .optional()?
                .ok_or_else(|| ShopError::NotFound("Item não encontrado".into()))?;

            diesel::delete(itens_carrinho.find(item.id)).execute(trx)?;
            devolver_estoque(trx, item.produto_id, item.quantidade)?;

            detalhe_carrinho(trx, carrinho)
        })
    }
}

impl Handler<CancelCarrinho> for PgActor {
    type Result = Result<(), ShopError>;

    fn handle(&mut self, msg: CancelCarrinho, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::itens_carrinho::dsl::{carrinho_id, itens_carrinho};

        let mut conn = establish_connection(&self.0)?;

        conn.build_transaction().run(|trx| {
            let carrinho = carrinho_por_slug(trx, &msg.slug)?;

            let itens = itens_carrinho
                .filter(carrinho_id.eq(carrinho.id))
                .load::<ItemCarrinho>(trx)?;

            for item in &itens {
                devolver_estoque(trx, item.produto_id, item.quantidade)?;
            }
            diesel::delete(itens_carrinho.filter(carrinho_id.eq(carrinho.id))).execute(trx)?;

            log::info!("carrinho {} cancelado, {} itens devolvidos ao estoque", carrinho.slug, itens.len());
            Ok(())
        })
    }
}
