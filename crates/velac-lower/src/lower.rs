//! The lowering driver: one postorder walk from AST to backend IR, with no
//! separate type-checking pass. Every site where two values meet goes
//! through [`crate::coerce`].
//!
//! Top-level statements have no enclosing function in the grammar, so they
//! are gathered into one synthetic entry function the same way the original
//! `CodeGenContext::generateCode` wraps its node list in an implicit `void
//! main()` before handing the module to the JIT. The entry point is named
//! `__velac_entry` rather than `main` so a user-defined `function main()` in
//! the source never collides with it.

use std::collections::HashMap;

use inkwell::basic_block::BasicBlock;
use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::types::{BasicMetadataTypeEnum, BasicType};
use inkwell::values::{BasicMetadataValueEnum, BasicValueEnum, FunctionValue, PointerValue};
use inkwell::{AddressSpace, FloatPredicate, IntPredicate};

use velac_parse::{
    ArrayDeclStmt, Ast, AssignExpr, BinOp, BinaryExpr, Block, CallExpr, CmpOp, ComparisonExpr,
    Expr, ForStmt, FunctionItem, IfStmt, IndexExpr, Param, PrintStmt, ReturnStmt, Stmt, TopLevel,
    Type as AstType, UnOp, UnaryExpr, VarDeclStmt, WhileStmt,
};
use velac_util::{Handler, Span, Symbol};

use crate::coerce::{coerce_to_common, coerce_to_target};
use crate::scope::{Binding, ScopeStack};
use crate::types::{scalar_to_basic, ScalarType, SurfaceType};

/// Name of the synthetic function top-level statements are gathered into.
pub const ENTRY_FN_NAME: &str = "__velac_entry";

struct FunctionSig<'ctx> {
    value: FunctionValue<'ctx>,
    params: Vec<SurfaceType>,
    ret: SurfaceType,
}

/// Owns the module under construction, the insertion cursor, the scope
/// stack, and the running diagnostic count. One instance lowers exactly one
/// program.
pub struct LoweringContext<'ctx, 'a> {
    context: &'ctx Context,
    module: Module<'ctx>,
    builder: Builder<'ctx>,
    scopes: ScopeStack<'ctx>,
    functions: HashMap<Symbol, FunctionSig<'ctx>>,
    current_function: Option<FunctionValue<'ctx>>,
    current_entry_block: Option<BasicBlock<'ctx>>,
    current_return_type: Option<SurfaceType>,
    printf_fn: FunctionValue<'ctx>,
    format_cache: HashMap<&'static str, PointerValue<'ctx>>,
    string_literal_count: usize,
    handler: &'a Handler,
}

impl<'ctx, 'a> LoweringContext<'ctx, 'a> {
    pub fn new(context: &'ctx Context, module_name: &str, handler: &'a Handler) -> Self {
        let module = context.create_module(module_name);
        let builder = context.create_builder();

        let ptr_ty = context.ptr_type(AddressSpace::default());
        let printf_ty = context.i32_type().fn_type(&[ptr_ty.into()], true);
        let printf_fn = module.add_function("printf", printf_ty, Some(Linkage::External));

        Self {
            context,
            module,
            builder,
            scopes: ScopeStack::new(),
            functions: HashMap::new(),
            current_function: None,
            current_entry_block: None,
            current_return_type: None,
            printf_fn,
            format_cache: HashMap::new(),
            string_literal_count: 0,
            handler,
        }
    }

    fn error(&self, message: impl Into<String>, span: Span) {
        self.handler.error(message, span);
    }

    /// Lowers the whole program. Returns `None` (without handing anything
    /// to a caller) if lowering produced at least one diagnostic — the
    /// module must never reach the JIT in that state.
    pub fn lower_program(mut self, ast: &Ast) -> Option<Module<'ctx>> {
        log::debug!("lowering {} top-level item(s)", ast.len());
        self.declare_functions(ast);

        let entry_fn_ty = self.context.void_type().fn_type(&[], false);
        let entry_fn = self.module.add_function(ENTRY_FN_NAME, entry_fn_ty, Some(Linkage::External));
        let entry_block = self.context.append_basic_block(entry_fn, "entry");
        self.builder.position_at_end(entry_block);

        self.current_function = Some(entry_fn);
        self.current_entry_block = Some(entry_block);
        self.current_return_type = Some(SurfaceType::Scalar(AstType::Void));
        self.scopes.push();

        for (i, item) in ast.iter().enumerate() {
            let errors_before = self.handler.error_count();
            match item {
                TopLevel::Function(f) => self.lower_function(f, entry_block),
                TopLevel::Stmt(s) => self.lower_stmt(s),
            }
            if self.handler.error_count() > errors_before {
                log::debug!("lowering failed for top-level item {i}");
            } else {
                log::debug!("lowered top-level item {i}");
            }
        }

        self.scopes.pop();
        if self.builder.get_insert_block().map(|b| b.get_terminator().is_none()).unwrap_or(false) {
            let _ = self.builder.build_return(None);
        }

        if self.handler.has_errors() {
            log::debug!("lowering produced {} error(s); withholding module from the JIT", self.handler.error_count());
            None
        } else {
            Some(self.module)
        }
    }

    fn declare_functions(&mut self, ast: &Ast) {
        for item in ast {
            let TopLevel::Function(f) = item else { continue };
            if self.functions.contains_key(&f.name) {
                self.error(format!("function `{}` is already defined", f.name.as_str()), f.span);
                continue;
            }

            if f.params.iter().any(|p| matches!(p.ty, AstType::Void)) {
                self.error(format!("`{}` has a `void` parameter; void is return-only", f.name.as_str()), f.span);
                continue;
            }

            if let Some(dup) = first_duplicate_param(&f.params) {
                self.error(
                    format!(
                        "`{}` has a duplicate parameter name `{}`",
                        f.name.as_str(),
                        dup.as_str()
                    ),
                    f.span,
                );
                continue;
            }

            let params: Vec<SurfaceType> = f.params.iter().map(|p| SurfaceType::Scalar(p.ty)).collect();
            let metadata_params: Vec<BasicMetadataTypeEnum> =
                params.iter().map(|t| scalar_to_basic(scalar_of(t), self.context).into()).collect();

            let fn_ty = if matches!(f.ret_type, AstType::Void) {
                self.context.void_type().fn_type(&metadata_params, false)
            } else {
                scalar_to_basic(f.ret_type, self.context).fn_type(&metadata_params, false)
            };

            let value = self.module.add_function(f.name.as_str(), fn_ty, Some(Linkage::External));
            self.functions.insert(f.name, FunctionSig { value, params, ret: SurfaceType::Scalar(f.ret_type) });
        }
    }

    /// Lowers one function body, then restores the builder's position to
    /// wherever top-level lowering was before the call — functions are
    /// lowered out of line from the entry function's linear instruction
    /// stream.
    fn lower_function(&mut self, item: &FunctionItem, resume_block: BasicBlock<'ctx>) {
        let Some(sig) = self.functions.get(&item.name) else { return };
        let function = sig.value;
        let param_types = sig.params.clone();
        let ret_type = sig.ret.clone();

        let entry = self.context.append_basic_block(function, "entry");
        self.builder.position_at_end(entry);

        let saved_function = self.current_function.replace(function);
        let saved_entry = self.current_entry_block.replace(entry);
        let saved_ret = self.current_return_type.replace(ret_type.clone());

        self.scopes.push();
        for (i, (param, ty)) in item.params.iter().zip(param_types.iter()).enumerate() {
            let llvm_ty = scalar_to_basic(scalar_of(ty), self.context);
            let slot = self.build_entry_alloca(llvm_ty, param.name.as_str());
            let incoming = function.get_nth_param(i as u32).expect("parameter count mismatch");
            self.builder.build_store(slot, incoming).ok();
            self.scopes.bind(param.name, Binding { slot, ty: ty.clone() });
        }

        self.lower_block(&item.body);

        let still_open = self.builder.get_insert_block().map(|b| b.get_terminator().is_none()).unwrap_or(false);
        if still_open {
            if matches!(ret_type, SurfaceType::Scalar(AstType::Void)) {
                let _ = self.builder.build_return(None);
            } else {
                self.error(
                    format!("function `{}` does not return a value on every path", item.name.as_str()),
                    item.span,
                );
            }
        }
        self.scopes.pop();

        self.current_function = saved_function;
        self.current_entry_block = saved_entry;
        self.current_return_type = saved_ret;
        self.builder.position_at_end(resume_block);
    }

    /// Builds an `alloca` at the start of the current function's entry
    /// block regardless of where the insertion cursor currently is, so
    /// repeated declarations inside a loop body don't grow the stack frame
    /// on every iteration.
    fn build_entry_alloca(&self, ty: inkwell::types::BasicTypeEnum<'ctx>, name: &str) -> PointerValue<'ctx> {
        let entry = self.current_entry_block.expect("alloca requested outside a function body");
        let temp_builder = self.context.create_builder();
        match entry.get_first_instruction() {
            Some(first) => temp_builder.position_before(&first),
            None => temp_builder.position_at_end(entry),
        }
        temp_builder.build_alloca(ty, name).expect("alloca never fails for a valid type")
    }

    // -- statements ---------------------------------------------------------

    fn lower_block(&mut self, block: &Block) {
        self.scopes.push();
        for stmt in &block.stmts {
            if self.builder.get_insert_block().map(|b| b.get_terminator().is_some()).unwrap_or(true) {
                break;
            }
            self.lower_stmt(stmt);
        }
        self.scopes.pop();
    }

    fn lower_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(e) => {
                self.lower_expr(e);
            },
            Stmt::VarDecl(d) => self.lower_var_decl(d),
            Stmt::ArrayDecl(d) => self.lower_array_decl(d),
            Stmt::Print(p) => self.lower_print(p),
            Stmt::Block(b) => self.lower_block(b),
            Stmt::If(s) => self.lower_if(s),
            Stmt::For(s) => self.lower_for(s),
            Stmt::While(s) => self.lower_while(s),
            Stmt::Return(r) => self.lower_return(r),
        }
    }

    fn lower_var_decl(&mut self, decl: &VarDeclStmt) {
        if self.scopes.declared_in_current_scope(decl.name) {
            self.error(format!("`{}` is already declared in this scope", decl.name.as_str()), decl.span);
            return;
        }
        if matches!(decl.ty, AstType::Void) {
            self.error(format!("`{}` cannot be declared `void`; void is return-only", decl.name.as_str()), decl.span);
            return;
        }

        let ty = SurfaceType::Scalar(decl.ty);
        let llvm_ty = scalar_to_basic(decl.ty, self.context);
        let slot = self.build_entry_alloca(llvm_ty, decl.name.as_str());

        // The slot is bound regardless of whether the initializer lowers
        // successfully, so a failed initializer reports exactly one error
        // instead of cascading into "undefined identifier" at every later
        // use of this variable.
        self.scopes.bind(decl.name, Binding { slot, ty: ty.clone() });

        if let Some(init) = &decl.init {
            let Some(value) = self.lower_expr(init) else { return };
            let Some(coerced) = coerce_to_target(self.context, &self.builder, value, &ty) else {
                self.error("initializer type is not compatible with the declared type".to_string(), decl.span);
                return;
            };
            self.builder.build_store(slot, coerced).ok();
        }
    }

    fn lower_array_decl(&mut self, decl: &ArrayDeclStmt) {
        if self.scopes.declared_in_current_scope(decl.name) {
            self.error(format!("`{}` is already declared in this scope", decl.name.as_str()), decl.span);
            return;
        }
        if matches!(decl.elem_ty, AstType::Void) {
            self.error(format!("array `{}` cannot have element type `void`", decl.name.as_str()), decl.span);
            return;
        }

        let size = decl.size.max(0) as u32;
        let ty = SurfaceType::Array(decl.elem_ty, size);
        let elem_llvm_ty = scalar_to_basic(decl.elem_ty, self.context);
        let array_llvm_ty = elem_llvm_ty.array_type(size);
        let slot = self.build_entry_alloca(array_llvm_ty.into(), decl.name.as_str());

        if let Some(elements) = &decl.init {
            if elements.len() as i32 != decl.size {
                self.error(
                    format!(
                        "array `{}` declared with {} elements but initialized with {}",
                        decl.name.as_str(),
                        decl.size,
                        elements.len()
                    ),
                    decl.span,
                );
                self.scopes.bind(decl.name, Binding { slot, ty });
                return;
            }

            let zero = self.context.i32_type().const_int(0, false);
            for (i, expr) in elements.iter().enumerate() {
                let Some(value) = self.lower_expr(expr) else { continue };
                let idx = self.context.i32_type().const_int(i as u64, false);
                let elem_ptr = unsafe {
                    self.builder.build_gep(array_llvm_ty, slot, &[zero, idx], "elem_init")
                };
                let Ok(elem_ptr) = elem_ptr else { continue };
                self.builder.build_store(elem_ptr, value.0).ok();
            }
        }

        self.scopes.bind(decl.name, Binding { slot, ty });
    }

    fn lower_print(&mut self, print: &PrintStmt) {
        let Some((value, ty)) = self.lower_expr(&print.expr) else { return };

        let format = match &ty {
            SurfaceType::Scalar(ScalarType::Int) | SurfaceType::Scalar(ScalarType::Bool) => "%d\n",
            SurfaceType::Scalar(ScalarType::BigInt) => "%lld\n",
            SurfaceType::Scalar(ScalarType::Float) => "%f\n",
            SurfaceType::Scalar(ScalarType::Char) => "%c\n",
            SurfaceType::Scalar(ScalarType::String) => "%s\n",
            _ => {
                self.error("this type cannot be printed".to_string(), print.span);
                return;
            },
        };

        // `printf` is variadic; the C calling convention default-promotes a
        // `float` argument to `double` before it reaches the callee, and
        // nothing does that promotion for us at the IR level the way a C
        // frontend would, so it has to happen explicitly here.
        let arg = if matches!(ty, SurfaceType::Scalar(ScalarType::Float)) {
            self.builder
                .build_float_ext(value.into_float_value(), self.context.f64_type(), "promote")
                .map(BasicValueEnum::from)
                .unwrap_or(value)
        } else {
            value
        };

        let fmt_ptr = self.format_string(format);
        let args: Vec<BasicMetadataValueEnum> = vec![fmt_ptr.into(), arg.into()];
        self.builder.build_call(self.printf_fn, &args, "print_call").ok();
    }

    fn format_string(&mut self, format: &'static str) -> PointerValue<'ctx> {
        if let Some(ptr) = self.format_cache.get(format) {
            return *ptr;
        }
        let ptr = self.global_string(format, "fmt");
        self.format_cache.insert(format, ptr);
        ptr
    }

    /// Allocates a read-only, privately linked module global holding a
    /// NUL-terminated byte array and returns a pointer to its first byte.
    fn global_string(&mut self, text: &str, prefix: &str) -> PointerValue<'ctx> {
        let name = format!("{prefix}.{}", self.string_literal_count);
        self.string_literal_count += 1;

        let bytes = self.context.const_string(text.as_bytes(), true);
        let global = self.module.add_global(bytes.get_type(), Some(AddressSpace::default()), &name);
        global.set_initializer(&bytes);
        global.set_linkage(Linkage::Private);
        global.set_constant(true);
        global.as_pointer_value()
    }

    fn lower_if(&mut self, stmt: &IfStmt) {
        let Some(function) = self.current_function else { return };
        let Some(cond) = self.lower_condition(&stmt.cond) else { return };

        let then_block = self.context.append_basic_block(function, "then");
        let else_block = self.context.append_basic_block(function, "else");
        let merge_block = self.context.append_basic_block(function, "merge");

        self.builder.build_conditional_branch(cond, then_block, else_block).ok();

        self.builder.position_at_end(then_block);
        self.lower_stmt(&stmt.then_branch);
        if self.builder.get_insert_block().map(|b| b.get_terminator().is_none()).unwrap_or(false) {
            self.builder.build_unconditional_branch(merge_block).ok();
        }

        self.builder.position_at_end(else_block);
        if let Some(else_branch) = &stmt.else_branch {
            self.lower_stmt(else_branch);
        }
        if self.builder.get_insert_block().map(|b| b.get_terminator().is_none()).unwrap_or(false) {
            self.builder.build_unconditional_branch(merge_block).ok();
        }

        self.builder.position_at_end(merge_block);
    }

    fn lower_while(&mut self, stmt: &WhileStmt) {
        let Some(function) = self.current_function else { return };
        let cond_block = self.context.append_basic_block(function, "cond");
        let body_block = self.context.append_basic_block(function, "body");
        let end_block = self.context.append_basic_block(function, "end");

        self.builder.build_unconditional_branch(cond_block).ok();

        self.builder.position_at_end(cond_block);
        let Some(cond) = self.lower_condition(&stmt.cond) else { return };
        self.builder.build_conditional_branch(cond, body_block, end_block).ok();

        self.builder.position_at_end(body_block);
        self.lower_stmt(&stmt.body);
        if self.builder.get_insert_block().map(|b| b.get_terminator().is_none()).unwrap_or(false) {
            self.builder.build_unconditional_branch(cond_block).ok();
        }

        self.builder.position_at_end(end_block);
    }

    fn lower_for(&mut self, stmt: &ForStmt) {
        let Some(function) = self.current_function else { return };
        self.scopes.push();

        if let Some(init) = &stmt.init {
            self.lower_stmt(init);
        }

        let cond_block = self.context.append_basic_block(function, "for_cond");
        let body_block = self.context.append_basic_block(function, "for_body");
        let end_block = self.context.append_basic_block(function, "for_end");

        self.builder.build_unconditional_branch(cond_block).ok();

        self.builder.position_at_end(cond_block);
        let keep_going = match &stmt.cond {
            Some(cond) => self.lower_condition(cond),
            None => Some(self.context.bool_type().const_int(1, false)),
        };
        let Some(keep_going) = keep_going else {
            self.scopes.pop();
            return;
        };
        self.builder.build_conditional_branch(keep_going, body_block, end_block).ok();

        self.builder.position_at_end(body_block);
        self.lower_stmt(&stmt.body);
        if self.builder.get_insert_block().map(|b| b.get_terminator().is_none()).unwrap_or(false) {
            if let Some(update) = &stmt.update {
                self.lower_expr(update);
            }
            self.builder.build_unconditional_branch(cond_block).ok();
        }

        self.builder.position_at_end(end_block);
        self.scopes.pop();
    }

    fn lower_return(&mut self, stmt: &ReturnStmt) {
        let Some(target) = self.current_return_type.clone() else { return };

        if matches!(target, SurfaceType::Scalar(AstType::Void)) {
            self.error("cannot return a value from a void function".to_string(), stmt.span);
            return;
        }

        let Some(value) = self.lower_expr(&stmt.expr) else { return };
        let Some(coerced) = coerce_to_target(self.context, &self.builder, value, &target) else {
            self.error("return value is not compatible with the function's return type".to_string(), stmt.span);
            return;
        };
        self.builder.build_return(Some(&coerced)).ok();
    }

    /// Lowers a condition expression and normalizes it to a 1-bit value,
    /// comparing an integer against zero if it is not already `bool`-typed.
    /// A float condition is rejected.
    fn lower_condition(&mut self, expr: &Expr) -> Option<inkwell::values::IntValue<'ctx>> {
        let (value, ty) = self.lower_expr(expr)?;
        match ty {
            SurfaceType::Scalar(ScalarType::Bool) => Some(value.into_int_value()),
            _ if ty.is_integer() => {
                let int_val = value.into_int_value();
                let zero = int_val.get_type().const_int(0, false);
                self.builder.build_int_compare(IntPredicate::NE, int_val, zero, "tobool").ok()
            },
            _ => {
                self.error("condition must be an integer or boolean expression".to_string(), expr.span());
                None
            },
        }
    }

    // -- expressions ----------------------------------------------------------

    fn lower_expr(&mut self, expr: &Expr) -> Option<(BasicValueEnum<'ctx>, SurfaceType)> {
        match expr {
            Expr::Int(v) => Some((self.context.i32_type().const_int(*v as u64, true).into(), SurfaceType::Scalar(ScalarType::Int))),
            Expr::Float(v) => Some((self.context.f32_type().const_float(*v as f64).into(), SurfaceType::Scalar(ScalarType::Float))),
            Expr::Bool(v) => Some((self.context.bool_type().const_int(*v as u64, false).into(), SurfaceType::Scalar(ScalarType::Bool))),
            Expr::Char(v) => Some((self.context.i8_type().const_int(*v as u64, false).into(), SurfaceType::Scalar(ScalarType::Char))),
            Expr::Str(sym) => {
                let ptr = self.global_string(sym.as_str(), "str");
                Some((ptr.into(), SurfaceType::Scalar(ScalarType::String)))
            },
            Expr::Ident(name) => self.lower_ident(*name, expr.span()),
            Expr::Unary(u) => self.lower_unary(u),
            Expr::Binary(b) => self.lower_binary(b),
            Expr::Comparison(c) => self.lower_comparison(c),
            Expr::Call(c) => self.lower_call(c),
            Expr::Index(i) => self.lower_index_load(i),
            Expr::Assign(a) => self.lower_assign(a),
        }
    }

    fn lower_ident(&mut self, name: Symbol, span: Span) -> Option<(BasicValueEnum<'ctx>, SurfaceType)> {
        let Some(binding) = self.scopes.lookup(name) else {
            self.error(format!("undefined identifier `{}`", name.as_str()), span);
            return None;
        };
        let llvm_ty = scalar_to_basic_or_array(&binding.ty, self.context);
        let loaded = self.builder.build_load(llvm_ty, binding.slot, name.as_str()).ok()?;
        Some((loaded, binding.ty.clone()))
    }

    fn lower_unary(&mut self, expr: &UnaryExpr) -> Option<(BasicValueEnum<'ctx>, SurfaceType)> {
        let (value, ty) = self.lower_expr(&expr.operand)?;
        match expr.op {
            UnOp::Neg => {
                if ty.is_float() {
                    Some((self.builder.build_float_neg(value.into_float_value(), "fneg").ok()?.into(), ty))
                } else if ty.is_integer() {
                    Some((self.builder.build_int_neg(value.into_int_value(), "ineg").ok()?.into(), ty))
                } else {
                    self.error("unary `-` requires a numeric operand".to_string(), expr.span);
                    None
                }
            },
            UnOp::Not => {
                if !ty.is_integer() {
                    self.error("unary `!` requires an integer operand".to_string(), expr.span);
                    return None;
                }
                let int_val = value.into_int_value();
                let all_ones = int_val.get_type().const_all_ones();
                Some((self.builder.build_xor(int_val, all_ones, "bitnot").ok()?.into(), ty))
            },
        }
    }

    fn lower_binary(&mut self, expr: &BinaryExpr) -> Option<(BasicValueEnum<'ctx>, SurfaceType)> {
        if expr.op == BinOp::Mod {
            self.error("modulo is not supported by this backend".to_string(), expr.span);
            return None;
        }

        let left = self.lower_expr(&expr.left)?;
        let right = self.lower_expr(&expr.right)?;

        if matches!(expr.op, BinOp::And | BinOp::Or) && (left.1.is_float() || right.1.is_float()) {
            self.error("`&&`/`||` do not accept a floating-point operand".to_string(), expr.span);
            return None;
        }

        let ((lval, lty), (rval, _rty)) = coerce_to_common(self.context, &self.builder, left, right).or_else(|| {
            self.error("operand types are not compatible".to_string(), expr.span);
            None
        })?;

        let result = match expr.op {
            BinOp::Add if lty.is_float() => self.builder.build_float_add(lval.into_float_value(), rval.into_float_value(), "fadd").ok()?.into(),
            BinOp::Add => self.builder.build_int_add(lval.into_int_value(), rval.into_int_value(), "iadd").ok()?.into(),
            BinOp::Sub if lty.is_float() => self.builder.build_float_sub(lval.into_float_value(), rval.into_float_value(), "fsub").ok()?.into(),
            BinOp::Sub => self.builder.build_int_sub(lval.into_int_value(), rval.into_int_value(), "isub").ok()?.into(),
            BinOp::Mul if lty.is_float() => self.builder.build_float_mul(lval.into_float_value(), rval.into_float_value(), "fmul").ok()?.into(),
            BinOp::Mul => self.builder.build_int_mul(lval.into_int_value(), rval.into_int_value(), "imul").ok()?.into(),
            BinOp::Div if lty.is_float() => self.builder.build_float_div(lval.into_float_value(), rval.into_float_value(), "fdiv").ok()?.into(),
            BinOp::Div => self.builder.build_int_signed_div(lval.into_int_value(), rval.into_int_value(), "sdiv").ok()?.into(),
            BinOp::And => self.builder.build_and(lval.into_int_value(), rval.into_int_value(), "and").ok()?.into(),
            BinOp::Or => self.builder.build_or(lval.into_int_value(), rval.into_int_value(), "or").ok()?.into(),
            BinOp::BitAnd => self.builder.build_and(lval.into_int_value(), rval.into_int_value(), "band").ok()?.into(),
            BinOp::BitOr => self.builder.build_or(lval.into_int_value(), rval.into_int_value(), "bor").ok()?.into(),
            BinOp::BitXor => self.builder.build_xor(lval.into_int_value(), rval.into_int_value(), "bxor").ok()?.into(),
            BinOp::Mod => unreachable!("handled above"),
        };

        Some((result, lty))
    }

    fn lower_comparison(&mut self, expr: &ComparisonExpr) -> Option<(BasicValueEnum<'ctx>, SurfaceType)> {
        let left = self.lower_expr(&expr.left)?;
        let right = self.lower_expr(&expr.right)?;
        let ((lval, lty), (rval, _)) = coerce_to_common(self.context, &self.builder, left, right).or_else(|| {
            self.error("operand types are not compatible".to_string(), expr.span);
            None
        })?;

        let result = if lty.is_float() {
            let pred = match expr.op {
                CmpOp::Eq => FloatPredicate::OEQ,
                CmpOp::Ne => FloatPredicate::ONE,
                CmpOp::Lt => FloatPredicate::OLT,
                CmpOp::Gt => FloatPredicate::OGT,
                CmpOp::Le => FloatPredicate::OLE,
                CmpOp::Ge => FloatPredicate::OGE,
            };
            self.builder.build_float_compare(pred, lval.into_float_value(), rval.into_float_value(), "fcmp").ok()?
        } else {
            let pred = match expr.op {
                CmpOp::Eq => IntPredicate::EQ,
                CmpOp::Ne => IntPredicate::NE,
                CmpOp::Lt => IntPredicate::SLT,
                CmpOp::Gt => IntPredicate::SGT,
                CmpOp::Le => IntPredicate::SLE,
                CmpOp::Ge => IntPredicate::SGE,
            };
            self.builder.build_int_compare(pred, lval.into_int_value(), rval.into_int_value(), "icmp").ok()?
        };

        Some((result.into(), SurfaceType::Scalar(ScalarType::Bool)))
    }

    fn lower_call(&mut self, call: &CallExpr) -> Option<(BasicValueEnum<'ctx>, SurfaceType)> {
        let Some(sig) = self.functions.get(&call.callee) else {
            self.error(format!("call to undefined function `{}`", call.callee.as_str()), call.span);
            return None;
        };
        let function = sig.value;
        let params = sig.params.clone();
        let ret = sig.ret.clone();

        if call.args.len() != params.len() {
            self.error(
                format!(
                    "`{}` expects {} argument(s) but {} were given",
                    call.callee.as_str(),
                    params.len(),
                    call.args.len()
                ),
                call.span,
            );
            return None;
        }

        let mut args = Vec::with_capacity(call.args.len());
        for (arg_expr, target_ty) in call.args.iter().zip(params.iter()) {
            let value = self.lower_expr(arg_expr)?;
            let coerced = coerce_to_target(self.context, &self.builder, value, target_ty).or_else(|| {
                self.error("argument type is not compatible with the parameter type".to_string(), arg_expr.span());
                None
            })?;
            args.push(BasicMetadataValueEnum::from(coerced));
        }

        let call_site = self.builder.build_call(function, &args, "call").ok()?;
        match call_site.try_as_basic_value().left() {
            Some(value) => Some((value, ret)),
            None => {
                self.error(
                    format!(
                        "`{}` returns void and cannot be used as a value",
                        call.callee.as_str()
                    ),
                    call.span,
                );
                None
            },
        }
    }

    fn lower_place(&mut self, expr: &Expr) -> Option<(PointerValue<'ctx>, SurfaceType)> {
        match expr {
            Expr::Ident(name) => {
                let Some(binding) = self.scopes.lookup(*name) else {
                    self.error(format!("undefined identifier `{}`", name.as_str()), expr.span());
                    return None;
                };
                Some((binding.slot, binding.ty.clone()))
            },
            Expr::Index(index) => self.lower_index_place(index),
            _ => {
                self.error("not a valid assignment target".to_string(), expr.span());
                None
            },
        }
    }

    fn lower_index_place(&mut self, index: &IndexExpr) -> Option<(PointerValue<'ctx>, SurfaceType)> {
        let Some(binding) = self.scopes.lookup(index.array) else {
            self.error(format!("undefined identifier `{}`", index.array.as_str()), index.span);
            return None;
        };
        let (elem_ty, size) = match &binding.ty {
            SurfaceType::Array(elem, size) => (*elem, *size),
            _ => {
                self.error(format!("`{}` is not an array", index.array.as_str()), index.span);
                return None;
            },
        };
        let array_ptr = binding.slot;
        let array_llvm_ty = scalar_to_basic(elem_ty, self.context).array_type(size);

        let (idx_value, idx_ty) = self.lower_expr(&index.index)?;
        if !idx_ty.is_integer() {
            self.error("array index must be an integer".to_string(), index.span);
            return None;
        }

        let zero = self.context.i32_type().const_int(0, false);
        let idx = idx_value.into_int_value();
        let elem_ptr = unsafe { self.builder.build_gep(array_llvm_ty, array_ptr, &[zero, idx], "elem_ptr") }.ok()?;
        Some((elem_ptr, SurfaceType::Scalar(elem_ty)))
    }

    fn lower_index_load(&mut self, index: &IndexExpr) -> Option<(BasicValueEnum<'ctx>, SurfaceType)> {
        let (ptr, ty) = self.lower_index_place(index)?;
        let llvm_ty = scalar_to_basic(scalar_of(&ty), self.context);
        let loaded = self.builder.build_load(llvm_ty, ptr, "elem").ok()?;
        Some((loaded, ty))
    }

    /// The right-hand side is stored as-is, without coercion to the
    /// target's declared type — unlike a variable initializer.
    fn lower_assign(&mut self, assign: &AssignExpr) -> Option<(BasicValueEnum<'ctx>, SurfaceType)> {
        let (ptr, place_ty) = self.lower_place(&assign.place)?;
        let value = self.lower_expr(&assign.value)?;
        self.builder.build_store(ptr, value.0).ok();
        Some((value.0, place_ty))
    }
}

fn scalar_of(ty: &SurfaceType) -> ScalarType {
    match ty {
        SurfaceType::Scalar(s) => *s,
        SurfaceType::Array(elem, _) => *elem,
    }
}

fn scalar_to_basic_or_array<'ctx>(ty: &SurfaceType, ctx: &'ctx Context) -> inkwell::types::BasicTypeEnum<'ctx> {
    match ty {
        SurfaceType::Scalar(s) => scalar_to_basic(*s, ctx),
        SurfaceType::Array(elem, size) => scalar_to_basic(*elem, ctx).array_type(*size).into(),
    }
}

/// Returns the first parameter name that reappears later in `params`, if
/// any — parameter names must be pairwise unique within a prototype.
fn first_duplicate_param(params: &[Param]) -> Option<Symbol> {
    for (i, p) in params.iter().enumerate() {
        if params[..i].iter().any(|earlier| earlier.name == p.name) {
            return Some(p.name);
        }
    }
    None
}
